//! `--set key=value` parsing.

use super::AppError;
use super::template::Parameters;

/// Parse repeated `key=value` flags into a parameter mapping.
///
/// The value is everything after the first `=`; both sides are trimmed.
/// Later flags override earlier ones with the same key.
pub fn parse_set_flags<S: AsRef<str>>(flags: &[S]) -> Result<Parameters, AppError> {
    let mut params = Parameters::new();

    for flag in flags {
        let flag = flag.as_ref();
        let (key, value) =
            flag.split_once('=').ok_or_else(|| AppError::InvalidSetFlag(flag.to_string()))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::EmptySetKey(flag.to_string()));
        }

        params.insert(key.to_string(), value.trim().to_string());
    }

    Ok(params)
}
