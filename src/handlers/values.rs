//! Translation of descriptor attribute values into Objective-C expressions

use crate::parser::ast::Element;

/// Objective-C string literal with escapes
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 3);
    out.push_str("@\"");
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a number without trailing zeros; `-0` becomes `0`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Normalize a numeric attribute; non-numbers pass through untouched
pub fn number(raw: &str) -> String {
    raw.trim()
        .parse::<f64>()
        .map(format_number)
        .unwrap_or_else(|_| raw.to_string())
}

pub fn boolean(value: bool) -> &'static str {
    if value {
        "YES"
    } else {
        "NO"
    }
}

/// `prefix` followed by `value` with its first letter upper-cased
pub fn enum_constant(prefix: &str, value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

/// `[UIImage imageNamed:@"name"]`
pub fn image(name: &str) -> String {
    format!("[UIImage imageNamed:{}]", string_literal(name))
}

/// Expression for a `<color>` element
pub fn color(el: &Element) -> Option<String> {
    if let Some(system) = el
        .attr("systemColor")
        .or_else(|| el.attr("cocoaTouchSystemColor"))
    {
        return Some(format!("[UIColor {}]", system));
    }
    if let Some(name) = el.attr("name") {
        return Some(format!("[UIColor colorNamed:{}]", string_literal(name)));
    }

    let alpha = el.attr("alpha").map(number).unwrap_or_else(|| "1".to_string());
    if let Some(white) = el.attr("white") {
        return Some(format!(
            "[UIColor colorWithWhite:{} alpha:{}]",
            number(white),
            alpha
        ));
    }

    match (el.attr("red"), el.attr("green"), el.attr("blue")) {
        (Some(r), Some(g), Some(b)) => Some(format!(
            "[UIColor colorWithRed:{} green:{} blue:{} alpha:{}]",
            number(r),
            number(g),
            number(b),
            alpha
        )),
        _ => None,
    }
}

/// Expression for a `<fontDescription>` element
pub fn font(el: &Element) -> Option<String> {
    if let Some(style) = el.attr("style") {
        let style = style.replacen("UICTFontTextStyle", "UIFontTextStyle", 1);
        return Some(format!("[UIFont preferredFontForTextStyle:{}]", style));
    }

    let size = number(el.attr("pointSize").unwrap_or("17"));
    if let Some(name) = el.attr("name") {
        return Some(format!(
            "[UIFont fontWithName:{} size:{}]",
            string_literal(name),
            size
        ));
    }

    match el.attr("type") {
        Some("boldSystem") => Some(format!("[UIFont boldSystemFontOfSize:{}]", size)),
        Some("italicSystem") => Some(format!("[UIFont italicSystemFontOfSize:{}]", size)),
        Some("system") | None => match el.attr("weight") {
            Some(weight) => Some(format!(
                "[UIFont systemFontOfSize:{} weight:{}]",
                size,
                enum_constant("UIFontWeight", weight)
            )),
            None => Some(format!("[UIFont systemFontOfSize:{}]", size)),
        },
        Some(_) => None,
    }
}

pub fn text_alignment(value: &str) -> String {
    enum_constant("NSTextAlignment", value)
}

pub fn line_break_mode(value: &str) -> String {
    match value {
        "wordWrap" => "NSLineBreakByWordWrapping".to_string(),
        "characterWrap" => "NSLineBreakByCharWrapping".to_string(),
        "clipping" => "NSLineBreakByClipping".to_string(),
        "headTruncation" => "NSLineBreakByTruncatingHead".to_string(),
        "middleTruncation" => "NSLineBreakByTruncatingMiddle".to_string(),
        _ => "NSLineBreakByTruncatingTail".to_string(),
    }
}

/// `UIControlState` constant for a button `<state key=...>`
pub fn control_state(key: &str) -> String {
    enum_constant("UIControlState", key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("Hi"), r#"@"Hi""#);
        assert_eq!(string_literal("say \"hi\"\n"), r#"@"say \"hi\"\n""#);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number("17"), "17");
        assert_eq!(number("17.0"), "17");
        assert_eq!(number("0.5"), "0.5");
        assert_eq!(number("-0"), "0");
        assert_eq!(number("abc"), "abc");
    }

    #[test]
    fn test_enum_constant() {
        assert_eq!(enum_constant("NSTextAlignment", "center"), "NSTextAlignmentCenter");
        assert_eq!(
            enum_constant("UIViewContentMode", "scaleAspectFit"),
            "UIViewContentModeScaleAspectFit"
        );
    }

    #[test]
    fn test_rgb_color() {
        let el = Element::new("color")
            .with_attr("red", "1")
            .with_attr("green", "0.5")
            .with_attr("blue", "0")
            .with_attr("alpha", "1");
        assert_eq!(
            color(&el).unwrap(),
            "[UIColor colorWithRed:1 green:0.5 blue:0 alpha:1]"
        );
    }

    #[test]
    fn test_white_and_system_colors() {
        let white = Element::new("color").with_attr("white", "1");
        assert_eq!(color(&white).unwrap(), "[UIColor colorWithWhite:1 alpha:1]");

        let system = Element::new("color").with_attr("systemColor", "systemBackgroundColor");
        assert_eq!(color(&system).unwrap(), "[UIColor systemBackgroundColor]");
    }

    #[test]
    fn test_fonts() {
        let system = Element::new("fontDescription")
            .with_attr("type", "system")
            .with_attr("pointSize", "15");
        assert_eq!(font(&system).unwrap(), "[UIFont systemFontOfSize:15]");

        let bold = Element::new("fontDescription")
            .with_attr("type", "boldSystem")
            .with_attr("pointSize", "20");
        assert_eq!(font(&bold).unwrap(), "[UIFont boldSystemFontOfSize:20]");

        let named = Element::new("fontDescription")
            .with_attr("name", "Avenir-Heavy")
            .with_attr("family", "Avenir")
            .with_attr("pointSize", "12");
        assert_eq!(
            font(&named).unwrap(),
            r#"[UIFont fontWithName:@"Avenir-Heavy" size:12]"#
        );

        let weighted = Element::new("fontDescription")
            .with_attr("type", "system")
            .with_attr("weight", "medium")
            .with_attr("pointSize", "14");
        assert_eq!(
            font(&weighted).unwrap(),
            "[UIFont systemFontOfSize:14 weight:UIFontWeightMedium]"
        );

        let styled = Element::new("fontDescription").with_attr("style", "UICTFontTextStyleBody");
        assert_eq!(
            font(&styled).unwrap(),
            "[UIFont preferredFontForTextStyle:UIFontTextStyleBody]"
        );
    }
}
