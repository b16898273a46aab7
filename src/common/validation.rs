/// Checks threshold ordering for percentage checks. Disk checks alert on
/// free space, so their warning threshold sits above the error threshold.
/// The error string is meant for a negative notification.
pub fn is_valid_threshold(warning: i64, error: i64, diskcheck: bool) -> Result<(), String> {
    if warning == 0 && error == 0 {
        return Err("Warning Threshold or Error Threshold need to be set".to_string());
    }
    let both_set = warning > 0 && error > 0;
    if !diskcheck && both_set && warning > error {
        return Err("Warning Threshold must be less than Error Threshold".to_string());
    }
    if diskcheck && both_set && warning < error {
        return Err("Warning Threshold must be more than Error Threshold".to_string());
    }
    Ok(())
}

/// Event ids are whole numbers or the `*` wildcard.
pub fn validate_event_id(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    if value.chars().all(char::is_whitespace) {
        return false;
    }
    value == "*" || value.trim().parse::<i64>().is_ok()
}

pub fn validate_retcode(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_rules() {
        assert_eq!(
            is_valid_threshold(0, 0, false).unwrap_err(),
            "Warning Threshold or Error Threshold need to be set"
        );
        assert_eq!(
            is_valid_threshold(90, 80, false).unwrap_err(),
            "Warning Threshold must be less than Error Threshold"
        );
        assert!(is_valid_threshold(70, 90, false).is_ok());
        assert!(is_valid_threshold(0, 90, false).is_ok());

        assert_eq!(
            is_valid_threshold(10, 25, true).unwrap_err(),
            "Warning Threshold must be more than Error Threshold"
        );
        assert!(is_valid_threshold(25, 10, true).is_ok());
        assert!(is_valid_threshold(25, 0, true).is_ok());
    }

    #[test]
    fn test_event_id() {
        assert!(!validate_event_id(None));
        assert!(!validate_event_id(Some("   ")));
        assert!(validate_event_id(Some("*")));
        assert!(validate_event_id(Some("4625")));
        assert!(!validate_event_id(Some("46x")));
        assert!(validate_event_id(Some(" 4625 ")));
        for fractional in ["4625.5", "1e3", "NaN", "inf"] {
            assert!(!validate_event_id(Some(fractional)), "{fractional}");
        }
    }

    #[test]
    fn test_retcode() {
        assert!(validate_retcode("0"));
        assert!(validate_retcode("1603"));
        assert!(!validate_retcode(""));
        assert!(!validate_retcode("-1"));
        assert!(!validate_retcode("1,2"));
    }
}
