pub fn parse_http_url(value: &str) -> Result<reqwest::Url, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("url is empty".to_string());
    }
    let url = reqwest::Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

pub fn parse_page_number(value: &str) -> Result<usize, String> {
    let raw = value.trim();
    let n: usize = raw
        .parse()
        .map_err(|_| format!("invalid page number '{raw}'"))?;
    if n == 0 {
        return Err("page numbers start at 1".to_string());
    }
    Ok(n)
}

// splits off the first whitespace-delimited word; the rest keeps its inner spacing
pub fn split_first_word(value: &str) -> (&str, &str) {
    let trimmed = value.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(idx) => (&trimmed[..idx], trimmed[idx..].trim_start()),
        None => (trimmed, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_requires_web_scheme() {
        assert!(parse_http_url("https://example.com/members.json").is_ok());
        assert!(parse_http_url("ftp://example.com/members.json").is_err());
        assert!(parse_http_url("   ").is_err());
    }

    #[test]
    fn page_number_is_one_based() {
        assert_eq!(parse_page_number(" 3 "), Ok(3));
        assert!(parse_page_number("0").is_err());
        assert!(parse_page_number("two").is_err());
    }

    #[test]
    fn split_first_word_keeps_inner_spacing() {
        assert_eq!(split_first_word("  set 3 name Ann  Lee"), ("set", "3 name Ann  Lee"));
        assert_eq!(split_first_word("quit"), ("quit", ""));
        assert_eq!(split_first_word(""), ("", ""));
    }
}
