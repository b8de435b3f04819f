use crate::model::AttachmentKind;

const FALLBACK_STEM: &str = "result";
const MAX_STEM_CHARS: usize = 120;

pub fn download_file_name(display_name: &str, kind: AttachmentKind) -> String {
    let stem = display_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !is_forbidden_in_file_name(*c))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let stem = if stem.is_empty() || stem.chars().all(|c| c == '.') {
        FALLBACK_STEM.to_string()
    } else {
        stem.chars().take(MAX_STEM_CHARS).collect()
    };

    format!("{stem}.{}", kind.extension())
}

fn is_forbidden_in_file_name(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

pub fn scale_label(percent: u32) -> String {
    format!("{percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_underscores() {
        assert_eq!(
            download_file_name("Xét nghiệm máu", AttachmentKind::Pdf),
            "Xét_nghiệm_máu.pdf"
        );
        assert_eq!(
            download_file_name("X-quang ngực chính diện", AttachmentKind::Image),
            "X-quang_ngực_chính_diện.jpg"
        );
    }

    #[test]
    fn test_no_whitespace_survives() {
        for name in [
            "  leading and trailing  ",
            "tabs\tand\nnewlines",
            "double  space",
            "non\u{a0}breaking",
        ] {
            let file = download_file_name(name, AttachmentKind::Pdf);
            assert!(!file.chars().any(char::is_whitespace), "{file:?}");
        }
        assert_eq!(
            download_file_name("double  space", AttachmentKind::Pdf),
            "double_space.pdf"
        );
    }

    #[test]
    fn test_path_separators_are_dropped() {
        assert_eq!(
            download_file_name("../../etc/passwd", AttachmentKind::Pdf),
            "....etcpasswd.pdf"
        );
        assert_eq!(
            download_file_name("a/b: c?", AttachmentKind::Image),
            "ab_c.jpg"
        );
    }

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(download_file_name("   ", AttachmentKind::Pdf), "result.pdf");
        assert_eq!(download_file_name("//", AttachmentKind::Image), "result.jpg");
        assert_eq!(download_file_name("..", AttachmentKind::Pdf), "result.pdf");
    }

    #[test]
    fn test_scale_label() {
        assert_eq!(scale_label(125), "125%");
    }
}
