//! Built-in handlers for UIKit descriptor elements
//!
//! Each handler is a pure function from the element to the class, constructor,
//! property assignments and method calls that recreate it. Interface Builder
//! only writes attributes that differ from their defaults, so the handlers
//! copy what is present and never invent values.

use crate::model::ObjectDescription;
use crate::parser::ast::Element;

use super::values::{
    boolean, color, control_state, enum_constant, font, image, line_break_mode, number,
    string_literal, text_alignment,
};

/// Start a description for `base`, honoring `customClass` and shared view attributes
fn describe(el: &Element, base: &str) -> ObjectDescription {
    let class = el.attr("customClass").unwrap_or(base);
    let mut desc = ObjectDescription::new(class);
    desc.base_class = base.to_string();
    desc.user_label = el.attr("userLabel").map(str::to_string);
    apply_view_attributes(el, &mut desc);
    apply_runtime_attributes(el, &mut desc);
    desc
}

fn apply_view_attributes(el: &Element, desc: &mut ObjectDescription) {
    if let Some(c) = el.keyed_child("color", "backgroundColor").and_then(color) {
        desc.set("backgroundColor", c);
    }
    if let Some(c) = el.keyed_child("color", "tintColor").and_then(color) {
        desc.set("tintColor", c);
    }
    if let Some(alpha) = el.attr("alpha") {
        desc.set("alpha", number(alpha));
    }
    if el.flag("hidden") {
        desc.set("hidden", "YES");
    }
    if el.flag("clipsSubviews") {
        desc.set("clipsToBounds", "YES");
    }
    if el.attr("userInteractionEnabled") == Some("NO") {
        desc.set("userInteractionEnabled", "NO");
    }
    if let Some(mode) = el.attr("contentMode").filter(|m| *m != "scaleToFill") {
        desc.set("contentMode", enum_constant("UIViewContentMode", mode));
    }
    if let Some(tag) = el.attr("tag") {
        desc.set("tag", number(tag));
    }
}

/// `User Defined Runtime Attributes` become key-path assignments
fn apply_runtime_attributes(el: &Element, desc: &mut ObjectDescription) {
    let Some(list) = el.child("userDefinedRuntimeAttributes") else {
        return;
    };
    for attr in list.children_named("userDefinedRuntimeAttribute") {
        let Some(key_path) = attr.attr("keyPath") else {
            continue;
        };
        let value = match attr.attr("type") {
            Some("number") => attr
                .child("real")
                .or_else(|| attr.child("integer"))
                .and_then(|v| v.attr("value"))
                .map(number),
            Some("boolean") => attr
                .child("boolean")
                .and_then(|v| v.attr("value"))
                .map(str::to_string),
            Some("string") => attr.attr("value").map(string_literal),
            Some("color") => attr.keyed_child("color", "value").and_then(color),
            _ => None,
        };
        if let Some(value) = value {
            desc.set(key_path, value);
        }
    }
}

/// Copy boolean attributes whose property name matches the attribute name
fn copy_flags(el: &Element, desc: &mut ObjectDescription, names: &[&str]) {
    for name in names {
        if let Some(value) = el.attr(name) {
            desc.set(*name, boolean(value == "YES"));
        }
    }
}

/// Copy numeric attributes whose property name matches the attribute name
fn copy_numbers(el: &Element, desc: &mut ObjectDescription, names: &[&str]) {
    for name in names {
        if let Some(value) = el.attr(name) {
            desc.set(*name, number(value));
        }
    }
}

fn copy_color(el: &Element, desc: &mut ObjectDescription, key: &str) {
    if let Some(c) = el.keyed_child("color", key).and_then(color) {
        desc.set(key, c);
    }
}

/// Text from a `text` attribute or a `<string key="text">` child
fn text_content(el: &Element) -> Option<String> {
    el.attr("text").map(str::to_string).or_else(|| {
        el.children
            .iter()
            .find(|c| (c.name == "string" || c.name == "mutableString") && c.attr("key") == Some("text"))
            .map(|c| c.text.clone().unwrap_or_default())
    })
}

fn apply_text_attributes(el: &Element, desc: &mut ObjectDescription) {
    if let Some(text) = text_content(el) {
        desc.set("text", string_literal(&text));
    }
    if let Some(alignment) = el.attr("textAlignment") {
        desc.set("textAlignment", text_alignment(alignment));
    }
    if let Some(f) = el.child("fontDescription").and_then(font) {
        desc.set("font", f);
    }
    copy_color(el, desc, "textColor");
}

const SCROLL_FLAGS: &[&str] = &[
    "showsHorizontalScrollIndicator",
    "showsVerticalScrollIndicator",
    "pagingEnabled",
    "bounces",
    "alwaysBounceVertical",
    "alwaysBounceHorizontal",
    "scrollEnabled",
];

pub fn view(el: &Element) -> ObjectDescription {
    describe(el, "UIView")
}

pub fn label(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UILabel");
    apply_text_attributes(el, &mut desc);
    copy_numbers(el, &mut desc, &["numberOfLines", "minimumScaleFactor"]);
    if let Some(mode) = el.attr("lineBreakMode") {
        desc.set("lineBreakMode", line_break_mode(mode));
    }
    if el.flag("adjustsFontSizeToFit") {
        desc.set("adjustsFontSizeToFitWidth", "YES");
    }
    desc
}

pub fn button(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIButton");
    let button_type = match el.attr("buttonType") {
        None | Some("custom") => "UIButtonTypeCustom".to_string(),
        Some("roundedRect") | Some("system") => "UIButtonTypeSystem".to_string(),
        Some(other) => enum_constant("UIButtonType", other),
    };
    desc.constructor = format!("[{} buttonWithType:{}]", desc.class, button_type);

    if let Some(f) = el.child("fontDescription").and_then(font) {
        desc.set("titleLabel.font", f);
    }
    if el.flag("selected") {
        desc.set("selected", "YES");
    }
    if el.attr("enabled") == Some("NO") {
        desc.set("enabled", "NO");
    }

    for state in el.children_named("state") {
        let Some(key) = state.attr("key") else {
            continue;
        };
        let control_state = control_state(key);
        if let Some(title) = state.attr("title") {
            desc.call(
                format!("setTitle:forState:{}", key),
                format!("setTitle:{} forState:{}", string_literal(title), control_state),
            );
        }
        if let Some(c) = state.keyed_child("color", "titleColor").and_then(color) {
            desc.call(
                format!("setTitleColor:forState:{}", key),
                format!("setTitleColor:{} forState:{}", c, control_state),
            );
        }
        if let Some(name) = state.attr("image") {
            desc.call(
                format!("setImage:forState:{}", key),
                format!("setImage:{} forState:{}", image(name), control_state),
            );
        }
        if let Some(name) = state.attr("backgroundImage") {
            desc.call(
                format!("setBackgroundImage:forState:{}", key),
                format!("setBackgroundImage:{} forState:{}", image(name), control_state),
            );
        }
    }
    desc
}

pub fn image_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIImageView");
    if let Some(name) = el.attr("image") {
        desc.set("image", image(name));
    }
    if let Some(name) = el.attr("highlightedImage") {
        desc.set("highlightedImage", image(name));
    }
    desc
}

pub fn text_field(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UITextField");
    apply_text_attributes(el, &mut desc);
    if let Some(placeholder) = el.attr("placeholder") {
        desc.set("placeholder", string_literal(placeholder));
    }
    if let Some(style) = el.attr("borderStyle") {
        desc.set("borderStyle", enum_constant("UITextBorderStyle", style));
    }
    if let Some(mode) = el.attr("clearButtonMode") {
        desc.set("clearButtonMode", enum_constant("UITextFieldViewMode", mode));
    }
    if let Some(traits) = el.keyed_child("textInputTraits", "textInputTraits") {
        if let Some(keyboard) = traits.attr("keyboardType") {
            desc.set("keyboardType", enum_constant("UIKeyboardType", keyboard));
        }
        if let Some(ret) = traits.attr("returnKeyType") {
            desc.set("returnKeyType", enum_constant("UIReturnKey", ret));
        }
        if traits.flag("secureTextEntry") {
            desc.set("secureTextEntry", "YES");
        }
    }
    desc
}

pub fn text_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UITextView");
    apply_text_attributes(el, &mut desc);
    copy_flags(el, &mut desc, SCROLL_FLAGS);
    copy_flags(el, &mut desc, &["editable", "selectable"]);
    desc
}

pub fn scroll_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIScrollView");
    copy_flags(el, &mut desc, SCROLL_FLAGS);
    desc
}

pub fn table_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UITableView");
    let style = enum_constant("UITableViewStyle", el.attr("style").unwrap_or("plain"));
    desc.constructor = format!(
        "[[{} alloc] initWithFrame:CGRectZero style:{}]",
        desc.class, style
    );
    copy_flags(el, &mut desc, SCROLL_FLAGS);
    copy_numbers(
        el,
        &mut desc,
        &[
            "rowHeight",
            "estimatedRowHeight",
            "sectionHeaderHeight",
            "sectionFooterHeight",
        ],
    );
    if let Some(style) = el.attr("separatorStyle") {
        desc.set(
            "separatorStyle",
            enum_constant("UITableViewCellSeparatorStyle", style),
        );
    }
    desc
}

pub fn table_view_cell(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UITableViewCell");
    let reuse = el
        .attr("reuseIdentifier")
        .map(string_literal)
        .unwrap_or_else(|| "nil".to_string());
    desc.constructor = format!(
        "[[{} alloc] initWithStyle:UITableViewCellStyleDefault reuseIdentifier:{}]",
        desc.class, reuse
    );
    if let Some(style) = el.attr("selectionStyle") {
        desc.set(
            "selectionStyle",
            enum_constant("UITableViewCellSelectionStyle", style),
        );
    }
    if let Some(accessory) = el.attr("accessoryType") {
        desc.set(
            "accessoryType",
            enum_constant("UITableViewCellAccessory", accessory),
        );
    }
    desc
}

pub fn collection_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UICollectionView");
    desc.constructor = format!(
        "[[{} alloc] initWithFrame:CGRectZero collectionViewLayout:[[UICollectionViewFlowLayout alloc] init]]",
        desc.class
    );
    copy_flags(el, &mut desc, SCROLL_FLAGS);
    desc
}

pub fn collection_view_cell(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UICollectionViewCell");
    desc.constructor = format!("[[{} alloc] initWithFrame:CGRectZero]", desc.class);
    desc
}

pub fn switch(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UISwitch");
    if el.flag("on") {
        desc.set("on", "YES");
    }
    copy_color(el, &mut desc, "onTintColor");
    copy_color(el, &mut desc, "thumbTintColor");
    desc
}

pub fn slider(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UISlider");
    copy_numbers(el, &mut desc, &["value"]);
    if let Some(min) = el.attr("minValue") {
        desc.set("minimumValue", number(min));
    }
    if let Some(max) = el.attr("maxValue") {
        desc.set("maximumValue", number(max));
    }
    copy_color(el, &mut desc, "minimumTrackTintColor");
    copy_color(el, &mut desc, "maximumTrackTintColor");
    desc
}

pub fn activity_indicator_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIActivityIndicatorView");
    if let Some(style) = el.attr("style") {
        desc.constructor = format!(
            "[[{} alloc] initWithActivityIndicatorStyle:{}]",
            desc.class,
            enum_constant("UIActivityIndicatorViewStyle", style)
        );
    }
    if el.attr("hidesWhenStopped") == Some("NO") {
        desc.set("hidesWhenStopped", "NO");
    }
    copy_color(el, &mut desc, "color");
    if el.flag("animating") {
        desc.call("startAnimating", "startAnimating");
    }
    desc
}

pub fn progress_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIProgressView");
    if let Some(style) = el.attr("progressViewStyle") {
        desc.constructor = format!(
            "[[{} alloc] initWithProgressViewStyle:{}]",
            desc.class,
            enum_constant("UIProgressViewStyle", style)
        );
    }
    copy_numbers(el, &mut desc, &["progress"]);
    copy_color(el, &mut desc, "progressTintColor");
    copy_color(el, &mut desc, "trackTintColor");
    desc
}

pub fn segmented_control(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UISegmentedControl");
    let titles: Vec<String> = el
        .child("segments")
        .map(|segments| {
            segments
                .children_named("segment")
                .map(|s| string_literal(s.attr("title").unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default();
    desc.constructor = format!(
        "[[{} alloc] initWithItems:@[{}]]",
        desc.class,
        titles.join(", ")
    );
    copy_numbers(el, &mut desc, &["selectedSegmentIndex"]);
    desc
}

pub fn page_control(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIPageControl");
    copy_numbers(el, &mut desc, &["numberOfPages", "currentPage"]);
    copy_color(el, &mut desc, "pageIndicatorTintColor");
    copy_color(el, &mut desc, "currentPageIndicatorTintColor");
    desc
}

pub fn stack_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIStackView");
    if let Some(axis) = el.attr("axis") {
        desc.set("axis", enum_constant("UILayoutConstraintAxis", axis));
    }
    if let Some(distribution) = el.attr("distribution") {
        desc.set(
            "distribution",
            enum_constant("UIStackViewDistribution", distribution),
        );
    }
    if let Some(alignment) = el.attr("alignment") {
        desc.set("alignment", enum_constant("UIStackViewAlignment", alignment));
    }
    copy_numbers(el, &mut desc, &["spacing"]);
    desc
}

pub fn visual_effect_view(el: &Element) -> ObjectDescription {
    let mut desc = describe(el, "UIVisualEffectView");
    let style = el
        .child("blurEffect")
        .and_then(|b| b.attr("style"))
        .unwrap_or("light");
    desc.constructor = format!(
        "[[{} alloc] initWithEffect:[UIBlurEffect effectWithStyle:{}]]",
        desc.class,
        enum_constant("UIBlurEffectStyle", style)
    );
    desc
}
