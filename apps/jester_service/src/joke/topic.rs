pub const FALLBACK_TOPIC: &str = "Life";
pub const MAX_TOPIC_CHARS: usize = 50;

/// Turns caller input into a topic that is safe to drop into the joke
/// prompt: non-empty, at most [`MAX_TOPIC_CHARS`] characters, one line, no
/// surrounding whitespace.
///
/// The length check runs on the trimmed input before it is cut to its first
/// line, so `"Cats\nDogs"` yields `"Cats"` while a 60-character input yields
/// the fallback even if it has an early line break.
pub fn normalize(topic: Option<&str>) -> String {
    let topic = match topic.map(str::trim) {
        Some(t) if !t.is_empty() && t.chars().count() <= MAX_TOPIC_CHARS => t,
        _ => {
            tracing::debug!(
                input_chars = ?topic.map(|t| t.chars().count()),
                "topic missing or out of range, using fallback"
            );
            FALLBACK_TOPIC
        }
    };

    topic
        .split(is_line_break)
        .next()
        .unwrap_or_default()
        .trim_end()
        .to_string()
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_single_line_topics_are_trimmed_only() {
        assert_eq!(normalize(Some("Cats")), "Cats");
        assert_eq!(normalize(Some("  Relationships  ")), "Relationships");
        assert_eq!(normalize(Some("\tMonday mornings\t")), "Monday mornings");
        assert_eq!(normalize(Some("a")), "a");
    }

    #[test]
    fn missing_or_blank_topics_fall_back() {
        assert_eq!(normalize(None), "Life");
        assert_eq!(normalize(Some("")), "Life");
        assert_eq!(normalize(Some("   ")), "Life");
        assert_eq!(normalize(Some("\n\r\t ")), "Life");
    }

    #[test]
    fn length_limit_is_inclusive_and_counts_characters() {
        let fifty = "A".repeat(50);
        assert_eq!(normalize(Some(&fifty)), fifty);
        assert_eq!(normalize(Some(&"A".repeat(51))), "Life");
        assert_eq!(normalize(Some(&"A".repeat(60))), "Life");

        let accents = "é".repeat(50);
        assert_eq!(normalize(Some(&accents)), accents);
    }

    #[test]
    fn surrounding_whitespace_does_not_count_towards_the_limit() {
        let padded = format!("   {}   ", "B".repeat(50));
        assert_eq!(normalize(Some(&padded)), "B".repeat(50));
    }

    #[test]
    fn only_the_first_line_is_kept() {
        assert_eq!(normalize(Some("Cats\nDogs")), "Cats");
        assert_eq!(normalize(Some("Cats\r\nDogs")), "Cats");
        assert_eq!(normalize(Some("  Cats \n Dogs  ")), "Cats");
    }

    #[test]
    fn long_input_falls_back_before_line_truncation() {
        let long = format!("Cats\n{}", "x".repeat(60));
        assert_eq!(normalize(Some(&long)), "Life");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_input_is_not_logged_verbatim() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let long = "secret-looking-topic ".repeat(10);
        let topic = tracing::subscriber::with_default(subscriber, || normalize(Some(&long)));

        assert_eq!(topic, "Life");
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("using fallback"));
        assert!(output.contains("input_chars=Some(210)"));
        assert!(!output.contains("secret-looking-topic"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            None,
            Some(""),
            Some("  Relationships  "),
            Some("Cats\nDogs"),
            Some("a \nb"),
            Some("\n\nx"),
            Some("line one\rline two"),
        ];
        let long = "A".repeat(60);
        for input in inputs.into_iter().chain([Some(long.as_str())]) {
            let once = normalize(input);
            assert_eq!(normalize(Some(&once)), once, "input: {:?}", input);
            assert!(!once.is_empty());
            assert!(once.chars().count() <= MAX_TOPIC_CHARS);
            assert!(!once.contains(is_line_break));
        }
    }
}
