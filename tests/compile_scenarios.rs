//! End-to-end compilation of descriptor fixtures

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use xib2objc::{compile, compile_with_config, CompileConfig, CompileError};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

fn document(root: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<document type="com.apple.InterfaceBuilder3.CocoaTouch.XIB" version="3.0">
    <objects>
        <placeholder placeholderIdentifier="IBFilesOwner" id="-1" userLabel="File's Owner"/>
        <placeholder placeholderIdentifier="IBFirstResponder" id="-2" customClass="UIResponder"/>
        {}
    </objects>
</document>"#,
        root
    )
}

#[test]
fn test_root_only_view() {
    let source = document(
        r#"<view contentMode="scaleToFill" id="root">
            <color key="backgroundColor" white="1" alpha="1" colorSpace="calibratedWhite"/>
        </view>"#,
    );
    let generated = compile(&source).expect("Should compile");
    assert_eq!(
        generated.body,
        "    self.backgroundColor = [UIColor colorWithWhite:1 alpha:1];\n\n"
    );
    assert!(!generated.body.contains(" *"));
    assert!(!generated.body.contains("addSubview"));
    assert!(!generated.body.contains("mas_makeConstraints"));
    assert_eq!(generated.properties, "");
}

#[test]
fn test_single_width_constraint() {
    let source = document(
        r#"<view id="root">
            <subviews>
                <view id="child">
                    <constraints>
                        <constraint firstAttribute="width" constant="100" id="w"/>
                    </constraints>
                </view>
            </subviews>
        </view>"#,
    );
    let generated = compile(&source).expect("Should compile");
    assert_eq!(generated.body.matches("mas_makeConstraints").count(), 1);
    assert!(generated.body.contains(
        "    [view_child mas_makeConstraints:^(MASConstraintMaker *make) {\n        make.width.mas_equalTo(100);\n    }];\n"
    ));
}

#[test]
fn test_sibling_constraint_from_both_endpoints() {
    let source = document(
        r#"<view id="root">
            <subviews>
                <view userLabel="a" id="A"/>
                <view userLabel="b" id="B"/>
            </subviews>
            <constraints>
                <constraint firstItem="A" firstAttribute="leading" secondItem="B" secondAttribute="leading" constant="8" id="ab"/>
                <constraint firstAttribute="leading" secondItem="B" secondAttribute="leading" constant="8" id="rb"/>
            </constraints>
        </view>"#,
    );
    let generated = compile(&source).expect("Should compile");
    assert!(generated
        .body
        .contains("make.leading.equalTo(self.b.mas_leading).offset(8);"));
    assert!(generated
        .body
        .contains("make.leading.equalTo(self.mas_leading).offset(-8);"));
}

#[test]
fn test_safe_area_is_unsupported() {
    let result = compile(&fixture("safe_area.xml"));
    assert!(matches!(
        result,
        Err(CompileError::UnsupportedFeature { .. })
    ));
}

#[test]
fn test_unknown_element_is_reported() {
    let source = document(
        r#"<view id="root"><subviews><mapView id="m"/></subviews></view>"#,
    );
    let err = compile(&source).unwrap_err();
    assert_eq!(err.to_string(), "can't parse xib object: mapView");
}

#[test]
fn test_dangling_constraint_reference() {
    let source = document(
        r#"<view id="root">
            <subviews><view id="a"/></subviews>
            <constraints>
                <constraint firstItem="a" firstAttribute="top" secondItem="gone" secondAttribute="bottom" id="c"/>
            </constraints>
        </view>"#,
    );
    assert!(matches!(
        compile(&source),
        Err(CompileError::DanglingReference { .. })
    ));
}

#[test]
fn test_profile_view_body() {
    let generated = compile(&fixture("profile_view.xml")).expect("Should compile");
    assert_eq!(generated.view_file.name, "ProfileView");
    assert_eq!(generated.view_file.inherit_name, "UIView");

    let expected = r#"    UIView *view_Sep_aa_001 = [[UIView alloc] init];
    view_Sep_aa_001.backgroundColor = [UIColor colorWithRed:0.9 green:0.9 blue:0.9 alpha:1];

    self.nameLabel = [[UILabel alloc] init];
    self.nameLabel.contentMode = UIViewContentModeLeft;
    self.nameLabel.font = [UIFont boldSystemFontOfSize:17];
    self.nameLabel.lineBreakMode = NSLineBreakByTruncatingTail;
    self.nameLabel.text = @"Name & Title";
    self.nameLabel.textAlignment = NSTextAlignmentNatural;
    self.nameLabel.textColor = [UIColor colorWithWhite:0 alpha:1];
    self.nameLabel.userInteractionEnabled = NO;

    self.avatar = [[UIImageView alloc] init];
    self.avatar.contentMode = UIViewContentModeScaleAspectFill;
    self.avatar.image = [UIImage imageNamed:@"avatar"];
    self.avatar.userInteractionEnabled = NO;

    self.backgroundColor = [UIColor colorWithWhite:1 alpha:1];

    [self addSubview:self.avatar];
    [self addSubview:self.nameLabel];
    [self addSubview:view_Sep_aa_001];

    [self.avatar mas_makeConstraints:^(MASConstraintMaker *make) {
        make.width.mas_equalTo(64);
        make.width.equalTo(self.avatar.mas_height);
        make.leading.equalTo(self.mas_leading).offset(16);
        make.top.equalTo(self.mas_top).offset(16);
    }];

    [self.nameLabel mas_makeConstraints:^(MASConstraintMaker *make) {
        make.leading.equalTo(self.avatar.mas_trailing).offset(16);
        make.top.equalTo(self.avatar.mas_top);
        make.trailing.equalTo(self.mas_trailing).offset(-16);
    }];

    [view_Sep_aa_001 mas_makeConstraints:^(MASConstraintMaker *make) {
        make.height.mas_equalTo(1);
        make.leading.equalTo(self.mas_leading);
        make.trailing.equalTo(self.mas_trailing);
        make.bottom.equalTo(self.mas_bottom);
    }];

"#;
    assert_eq!(generated.body, expected);
}

#[test]
fn test_profile_view_properties() {
    let generated = compile(&fixture("profile_view.xml")).expect("Should compile");
    insta::assert_snapshot!(generated.properties.trim_end(), @r###"
    @property (nonatomic, strong) UIImageView *avatar;
    @property (nonatomic, strong) UILabel *nameLabel;
    "###);
}

#[test]
fn test_table_cell_addresses_content_view() {
    let generated = compile(&fixture("feed_cell.xml")).expect("Should compile");
    let file = &generated.view_file;
    assert_eq!(file.name, "FeedCell");
    assert_eq!(file.inherit_name, "UITableViewCell");
    assert_eq!(
        file.constructor,
        "initWithStyle:(UITableViewCellStyle)style reuseIdentifier:(NSString *)reuseIdentifier"
    );

    let body = &generated.body;
    assert!(body.contains("    self.selectionStyle = UITableViewCellSelectionStyleNone;\n"));
    assert!(body.contains("    [self.contentView addSubview:self.headline];\n"));
    assert!(body.contains("    [self.contentView addSubview:switch_Sw1_bb_001];\n"));
    assert!(!body.contains("[self addSubview:"));
    assert!(body.contains(
        "    [switch_Sw1_bb_001 mas_makeConstraints:^(MASConstraintMaker *make) {\n        make.centerY.equalTo(self.contentView.mas_centerY);\n        make.leading.greaterThanOrEqualTo(self.headline.mas_trailing).offset(8);\n        make.trailing.equalTo(self.contentView.mas_trailing).offset(-15);\n    }];\n"
    ));

    // Every reference to the cell itself goes through its content view
    for line in body.lines().filter(|l| l.contains("make.")) {
        if line.contains("(self.") && !line.contains("self.headline") {
            assert!(line.contains("self.contentView.mas_"), "{}", line);
        }
    }
}

#[test]
fn test_collection_cell_addresses_content_view() {
    let generated = compile(&fixture("photo_cell.xml")).expect("Should compile");
    let file = &generated.view_file;
    assert_eq!(file.name, "PhotoCell");
    assert_eq!(file.inherit_name, "UICollectionViewCell");
    assert_eq!(file.constructor, "initWithFrame:(CGRect)frame");

    let body = &generated.body;
    assert!(body.contains("    [self.contentView addSubview:self.photo];\n"));
    assert!(body.contains("    [self.contentView addSubview:label_Cp1_cc_001];\n"));
    assert!(!body.contains("[self addSubview:"));
    assert!(body.contains(
        "    [self.photo mas_makeConstraints:^(MASConstraintMaker *make) {\n        make.top.equalTo(self.contentView.mas_top);\n        make.leading.equalTo(self.contentView.mas_leading).offset(8);\n        make.trailing.equalTo(self.contentView.mas_trailing).offset(-8);\n    }];\n"
    ));
    assert!(body.contains(
        "    [label_Cp1_cc_001 mas_makeConstraints:^(MASConstraintMaker *make) {\n        make.height.mas_equalTo(20);\n        make.top.equalTo(self.photo.mas_bottom).offset(4);\n    }];\n"
    ));
}

#[test]
fn test_nested_effect_view_keeps_both_constraint_lists() {
    let generated = compile(&fixture("blur_banner.xml")).expect("Should compile");
    let body = &generated.body;

    assert!(body.contains("UIVisualEffectView *visualEffectView_Fx1_dd_001 = "));
    assert!(body.contains("    [self addSubview:visualEffectView_Fx1_dd_001];\n"));
    assert!(body.contains(
        "    [visualEffectView_Fx1_dd_001.contentView addSubview:self.status];\n"
    ));
    assert!(body.contains(
        "    [visualEffectView_Fx1_dd_001 mas_makeConstraints:^(MASConstraintMaker *make) {\n        make.height.mas_equalTo(100);\n        make.leading.equalTo(self.mas_leading);\n        make.trailing.equalTo(self.mas_trailing);\n    }];\n"
    ));
    assert!(body.contains(
        "    [self.status mas_makeConstraints:^(MASConstraintMaker *make) {\n        make.top.equalTo(visualEffectView_Fx1_dd_001.contentView.mas_top).offset(4);\n        make.leading.equalTo(visualEffectView_Fx1_dd_001.contentView.mas_leading).offset(8);\n    }];\n"
    ));
}

#[test]
fn test_mirrored_constraint_keeps_relation() {
    let source = document(
        r#"<view id="root">
            <subviews><view id="a"/></subviews>
            <constraints>
                <constraint firstAttribute="trailing" relation="greaterThanOrEqual" secondItem="a" secondAttribute="trailing" constant="8" id="c"/>
            </constraints>
        </view>"#,
    );
    let generated = compile(&source).expect("Should compile");
    assert!(generated
        .body
        .contains("make.trailing.greaterThanOrEqualTo(self.mas_trailing).offset(-8);"));
}

#[test]
fn test_duplicate_identifier_is_rejected() {
    let source = document(
        r#"<view id="root"><subviews><view id="a"/><label id="a"/></subviews></view>"#,
    );
    let err = compile(&source).unwrap_err();
    assert!(matches!(err, CompileError::DuplicateIdentifier { ref id } if id == "a"));
    assert_eq!(err.to_string(), "duplicate identifier 'a'");
}

#[test]
fn test_self_only_expressions_have_no_counterpart() {
    let generated = compile(&fixture("profile_view.xml")).expect("Should compile");
    for line in generated.body.lines().filter(|l| l.contains(".mas_equalTo(")) {
        assert!(!line.contains(".mas_width") && !line.contains("self."), "{}", line);
    }
}

#[test]
fn test_declarations_precede_references() {
    let generated = compile(&fixture("profile_view.xml")).expect("Should compile");
    let lines: Vec<&str> = generated.body.lines().collect();
    let declared_at = |name: &str| {
        lines
            .iter()
            .position(|l| l.trim_start().starts_with(&format!("{} = ", name)) || l.contains(&format!("*{} = ", name)))
            .unwrap_or_else(|| panic!("{} never declared", name))
    };
    for name in ["self.avatar", "self.nameLabel", "view_Sep_aa_001"] {
        let declared = declared_at(name);
        let first_reference = lines
            .iter()
            .position(|l| l.contains(name))
            .expect("Should be referenced");
        assert_eq!(first_reference, declared, "{} referenced before declaration", name);
    }
}

#[test]
fn test_compiling_twice_is_identical() {
    for name in ["profile_view.xml", "feed_cell.xml", "photo_cell.xml", "blur_banner.xml"] {
        let source = fixture(name);
        let config = CompileConfig::new().with_view_name("Same");
        let first = compile_with_config(&source, &config).unwrap();
        let second = compile_with_config(&source, &config).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_fixture_paths_exist() {
    let dir: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures"].iter().collect();
    for name in [
        "profile_view.xml",
        "feed_cell.xml",
        "photo_cell.xml",
        "blur_banner.xml",
        "safe_area.xml",
    ] {
        assert!(dir.join(name).exists());
    }
}
