//! Header and implementation skeletons with placeholder substitution

use chrono::{Local, NaiveDate};

use crate::model::ViewFile;

pub const VIEW_NAME: &str = "[View-Name]";
pub const INHERIT_NAME: &str = "[Inherit-Name]";
pub const CONSTRUCTOR: &str = "[Constructor]";
pub const SUPER_CONSTRUCTOR: &str = "[Super-Constructor]";
pub const PROPERTY: &str = "[Property]";
pub const UI_LAYOUT: &str = "[UI-Layout]";
pub const AUTHOR: &str = "[Author]";
pub const DATE: &str = "[Date]";
pub const YEAR: &str = "[Year]";

const DEFAULT_HEADER: &str = "\
//
//  [View-Name].h
//
//  Created by [Author] on [Date].
//  Copyright (c) [Year] [Author]. All rights reserved.
//

#import <UIKit/UIKit.h>

@interface [View-Name] : [Inherit-Name]

@end
";

const DEFAULT_IMPLEMENTATION: &str = "\
//
//  [View-Name].m
//
//  Created by [Author] on [Date].
//  Copyright (c) [Year] [Author]. All rights reserved.
//

#import \"[View-Name].h\"
#import <Masonry/Masonry.h>

@interface [View-Name] ()

[Property]
@end

@implementation [View-Name]

- (instancetype)[Constructor] {
    self = [super [Super-Constructor]];
    if (self) {
        [self setupViews];
    }
    return self;
}

- (void)setupViews {
[UI-Layout]}

@end
";

/// Format of generated `[Date]` stamps
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Author and date stamped into generated files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectInfo {
    pub author: String,
    pub date: String,
    /// Falls back to the leading year of `date` when empty
    pub year: String,
}

impl ProjectInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Stamp today's local date when none was configured
    pub fn or_today(self) -> Self {
        self.or_date(Local::now().date_naive())
    }

    /// Stamp `date` (`YYYY/MM/DD`) when none was configured
    pub fn or_date(mut self, date: NaiveDate) -> Self {
        if self.date.is_empty() {
            self.date = date.format(DATE_FORMAT).to_string();
        }
        self
    }

    /// Explicit year, else the four leading digits of the date
    pub fn year(&self) -> &str {
        if !self.year.is_empty() {
            return &self.year;
        }
        match self.date.get(..4) {
            Some(prefix) if prefix.chars().all(|c| c.is_ascii_digit()) => prefix,
            _ => "",
        }
    }
}

/// The two generated files for one view
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub name: String,
    pub header: String,
    pub implementation: String,
}

impl Artifacts {
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.name)
    }

    pub fn implementation_file_name(&self) -> String {
        format!("{}.m", self.name)
    }
}

/// Header and implementation skeletons
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSet {
    pub header: String,
    pub implementation: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            implementation: DEFAULT_IMPLEMENTATION.to_string(),
        }
    }
}

impl TemplateSet {
    pub fn new(header: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            implementation: implementation.into(),
        }
    }

    /// Replace the header skeleton
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Replace the implementation skeleton
    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = implementation.into();
        self
    }

    /// Fill both skeletons
    ///
    /// Generated text is substituted last so placeholder-like strings inside
    /// the layout body are left alone.
    pub fn render(
        &self,
        view_file: &ViewFile,
        properties: &str,
        layout: &str,
        project: &ProjectInfo,
    ) -> Artifacts {
        let fill = |skeleton: &str| {
            skeleton
                .replace(VIEW_NAME, &view_file.name)
                .replace(INHERIT_NAME, &view_file.inherit_name)
                .replace(SUPER_CONSTRUCTOR, &view_file.super_invocation())
                .replace(CONSTRUCTOR, &view_file.constructor)
                .replace(AUTHOR, &project.author)
                .replace(DATE, &project.date)
                .replace(YEAR, project.year())
                .replace(PROPERTY, properties)
                .replace(UI_LAYOUT, layout)
        };

        Artifacts {
            name: view_file.name.clone(),
            header: fill(&self.header),
            implementation: fill(&self.implementation),
        }
    }
}
