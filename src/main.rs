fn main() {
    ngcli::app::cli::run();
}
