//! Stylesheet scanning for stroke widths

use ahash::AHashMap;
use regex::Regex;
use std::sync::OnceLock;

/// Class name to declared stroke width
pub type StyleMap = AHashMap<String, f64>;

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid comment regex"))
}

fn stroke_width_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[;{\s])stroke-width\s*:\s*([0-9]*\.?[0-9]+)").expect("valid stroke-width regex")
    })
}

fn class_selector_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.([A-Za-z_][\w-]*)$").expect("valid selector regex"))
}

/// Collect `class -> stroke-width` from every stylesheet block.
///
/// Only plain class selectors (`.st1`, or lists like `.st1, .st2`) with a
/// numeric `stroke-width` count. Later rules overwrite earlier ones.
pub fn parse_styles<S: AsRef<str>>(blocks: &[S]) -> StyleMap {
    let mut styles = StyleMap::new();

    for block in blocks {
        let css = comment_regex().replace_all(block.as_ref(), "");
        for rule in css.split('}') {
            let Some((selectors, body)) = rule.split_once('{') else {
                continue;
            };
            let Some(width) = stroke_width_regex()
                .captures(body)
                .and_then(|c| c[1].parse::<f64>().ok())
            else {
                continue;
            };

            for selector in selectors.split(',') {
                if let Some(caps) = class_selector_regex().captures(selector.trim()) {
                    styles.insert(caps[1].to_string(), width);
                }
            }
        }
    }

    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illustrator_style_block() {
        let css = "\n\t.st0{fill:#E6E6E6;stroke:#000000;stroke-miterlimit:10;}\n\t.st1{fill:none;stroke:#0000FF;stroke-width:3;stroke-miterlimit:10;}\n\t.st2{fill:none;stroke:#000000;stroke-width:0.75;}\n";
        let styles = parse_styles(&[css]);
        assert_eq!(styles.len(), 2);
        assert_eq!(styles.get("st1"), Some(&3.0));
        assert_eq!(styles.get("st2"), Some(&0.75));
        assert!(styles.get("st0").is_none());
    }

    #[test]
    fn test_last_rule_wins() {
        let styles = parse_styles(&[".a{stroke-width:2;}", ".a{stroke-width:4;}"]);
        assert_eq!(styles.get("a"), Some(&4.0));
    }

    #[test]
    fn test_selector_list_and_multiline_rule() {
        let css = ".water, .deep {\n  stroke: blue;\n  stroke-width: 5;\n}\n/* .old{stroke-width:9;} */";
        let styles = parse_styles(&[css]);
        assert_eq!(styles.get("water"), Some(&5.0));
        assert_eq!(styles.get("deep"), Some(&5.0));
        assert!(styles.get("old").is_none());
    }

    #[test]
    fn test_non_class_selectors_ignored() {
        let styles = parse_styles(&["line{stroke-width:2;} #edge{stroke-width:3;} g .x{stroke-width:4;}"]);
        assert!(styles.is_empty());
    }

    #[test]
    fn test_no_stylesheet() {
        let styles = parse_styles::<&str>(&[]);
        assert!(styles.is_empty());
    }
}
