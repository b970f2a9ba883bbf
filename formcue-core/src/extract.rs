use std::sync::LazyLock;

use log::debug;
use regex::Regex;

pub const MAX_KEY_POINTS: usize = 5;
/// Lines must be strictly longer than this.
pub const MIN_POINT_LEN: usize = 10;
/// Lines must be strictly shorter than this.
pub const MAX_POINT_LEN: usize = 150;

static NUMBER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("valid number marker regex"));
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s*").expect("valid bullet marker regex"));
static BOLD_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*[^*]*\*\*:?\s*").expect("valid bold heading regex"));

fn clean_line(line: &str) -> String {
    let line = NUMBER_MARKER.replace(line, "").into_owned();
    // `**` opens a bold span, not a `*` bullet.
    let line = if line.starts_with("**") {
        line
    } else {
        BULLET_MARKER.replace(&line, "").into_owned()
    };
    BOLD_HEADING.replace(&line, "").into_owned()
}

fn acceptable(point: &str) -> bool {
    let len = point.chars().count();
    len > MIN_POINT_LEN && len < MAX_POINT_LEN
}

/// Pull up to [`MAX_KEY_POINTS`] instructional lines out of a completion.
///
/// Never fails: text with no usable lines yields an empty list.
pub fn extract_key_points(text: &str) -> Vec<String> {
    let points: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(clean_line)
        .filter(|point| acceptable(point))
        .take(MAX_KEY_POINTS)
        .collect();
    debug!(
        "extract_key_points input_len={} accepted={}",
        text.len(),
        points.len()
    );
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_list() {
        let text = "1. Keep your back straight\n2. Engage your core\n3. Control the descent\n4. Breathe steadily";
        assert_eq!(
            extract_key_points(text),
            vec![
                "Keep your back straight",
                "Engage your core",
                "Control the descent",
                "Breathe steadily",
            ]
        );
    }

    #[test]
    fn bullets_and_bold_headings() {
        let text = "**Form cues:**\n**Tip:** Keep elbows tucked in tight\n- Drive through your heels firmly\n• Squeeze glutes at the top\n* **Brace:** Ribs down before each rep";
        assert_eq!(
            extract_key_points(text),
            vec![
                "Keep elbows tucked in tight",
                "Drive through your heels firmly",
                "Squeeze glutes at the top",
                "Ribs down before each rep",
            ]
        );
    }

    #[test]
    fn parenthesised_numbers_and_blank_lines() {
        let text = "\n\n  1) Hinge at the hips first  \n\n2)Lock out with your glutes\r\n";
        assert_eq!(
            extract_key_points(text),
            vec!["Hinge at the hips first", "Lock out with your glutes"]
        );
    }

    #[test]
    fn length_bounds_are_exclusive() {
        let ten = "a".repeat(10);
        let eleven = "b".repeat(11);
        let one_fifty = "c".repeat(150);
        let one_forty_nine = "d".repeat(149);
        let text = [ten.as_str(), eleven.as_str(), one_fifty.as_str(), one_forty_nine.as_str()].join("\n");
        assert_eq!(extract_key_points(&text), vec![eleven, one_forty_nine]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 11 characters, 22 bytes
        let point = "é".repeat(11);
        assert_eq!(extract_key_points(&point), vec![point.clone()]);
    }

    #[test]
    fn caps_at_five_in_order() {
        let text = (1..=7)
            .map(|i| format!("{}. Candidate point number {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        let points = extract_key_points(&text);
        assert_eq!(points.len(), MAX_KEY_POINTS);
        let expected: Vec<String> = (1..=5).map(|i| format!("Candidate point number {}", i)).collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn rejected_lines_do_not_count_towards_the_cap() {
        let text = "Short\n1. First real point here\nTiny\n2. Second real point here";
        assert_eq!(extract_key_points(text).len(), 2);
    }

    #[test]
    fn keeps_duplicates() {
        let text = "- Keep your chest up\n- Keep your chest up";
        assert_eq!(extract_key_points(text).len(), 2);
    }

    #[test]
    fn extracting_twice_changes_nothing() {
        let text = "Here are your tips:\n1. **Setup:** Plant feet shoulder width apart\n2) Brace your core before descending\n- Keep the bar over mid-foot\n• Drive up through the whole foot";
        let once = extract_key_points(text);
        let twice = extract_key_points(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_gives_nothing() {
        assert!(extract_key_points("").is_empty());
        assert!(extract_key_points("\n \n\t\n").is_empty());
    }
}
