/// Mask the local part of an email ("jo****@gmail.com")
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };
    let visible: String = local.chars().take(2).collect();
    let hidden = local.chars().count().saturating_sub(2).max(1);
    format!("{}{}@{}", visible, "*".repeat(hidden), domain)
}

/// Compact count for action buttons; zero renders empty
pub fn format_count(count: u64) -> String {
    match count {
        0 => String::new(),
        1..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}K", count as f64 / 1_000.0).replace(".0K", "K"),
        _ => format!("{:.1}M", count as f64 / 1_000_000.0).replace(".0M", "M"),
    }
}

/// Human-readable size of a picked file
pub fn format_file_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Video length as m:ss
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("john.doe@gmail.com"), "jo******@gmail.com");
        assert_eq!(mask_email("a@x.io"), "a*@x.io");
        assert_eq!(mask_email("not-an-email"), "not-an-email");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "");
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1_000), "1K");
        assert_eq!(format_count(1_540), "1.5K");
        assert_eq!(format_count(2_000_000), "2M");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(75), "1:15");
    }
}
