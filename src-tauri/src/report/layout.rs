//! Page layout for the diagnosis report.
//!
//! Coordinates are millimetres on A4 with the origin at the top-left, the
//! way the regions were originally specified. `pdf` flips them when drawing.

use chrono::NaiveDateTime;

use super::metrics::{text_width_mm, wrap_text};
use crate::diagnosis::Diagnosis;
use crate::prediction::ClassificationResult;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const CONTENT_WIDTH_MM: f32 = 170.0;

const LEFT_MARGIN: f32 = 20.0;
const INDENT: f32 = 30.0;
const RIGHT_EDGE: f32 = 190.0;
const TOP_MARGIN: f32 = 20.0;
/// Lowest baseline for body content; below this the footer band starts.
const BODY_LIMIT: f32 = 270.0;
const FOOTER_Y: f32 = 280.0;
const LINE_STEP: f32 = 10.0;

pub const REPORT_TITLE: &str = "Gymnema Sylvestre Disease Detection Report";
pub const FOOTER_CAPTION: &str = "This report was generated by the LEAF Disease Detection System";

const GREEN: Rgb = Rgb(40, 167, 69);
const BLACK: Rgb = Rgb(0, 0, 0);
const RULE_GRAY: Rgb = Rgb(200, 200, 200);
const STAMP_GRAY: Rgb = Rgb(100, 100, 100);
const FOOTER_GRAY: Rgb = Rgb(150, 150, 150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Which fixed region a text mark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Summary,
    Heading,
    LineItem,
    Treatment,
    Timestamp,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text {
        role: TextRole,
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
        align: Align,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        color: Rgb,
    },
}

impl Mark {
    /// Left edge of a text mark after alignment.
    pub fn text_origin_x(&self) -> Option<f32> {
        match self {
            Mark::Text {
                x, size, align, text, ..
            } => Some(match align {
                Align::Left => *x,
                Align::Center => x - text_width_mm(text, *size) / 2.0,
            }),
            Mark::Rule { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<ReportPage>,
}

impl ReportLayout {
    /// Text of every mark with `role`, in reading order across pages.
    pub fn texts(&self, role: TextRole) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| p.marks.iter())
            .filter_map(|m| match m {
                Mark::Text { role: r, text, .. } if *r == role => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Tracks the current page and baseline, starting a new page when body
/// content would run into the footer band.
struct Cursor {
    pages: Vec<ReportPage>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![ReportPage::default()],
            y: TOP_MARGIN,
        }
    }

    fn move_to(&mut self, y: f32) {
        self.y = y;
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
        if self.y > BODY_LIMIT {
            self.pages.push(ReportPage::default());
            self.y = TOP_MARGIN;
        }
    }

    fn push(&mut self, mark: Mark) {
        if let Some(page) = self.pages.last_mut() {
            page.marks.push(mark);
        }
    }

    fn text(&mut self, role: TextRole, x: f32, size: f32, color: Rgb, text: String) {
        let y = self.y;
        self.push(Mark::Text {
            role,
            x,
            y,
            size,
            color,
            align: Align::Left,
            text,
        });
    }

    /// Left-aligned text wrapped to the right edge. Continuation lines
    /// advance by `LINE_STEP` and may start a new page.
    fn wrapped(&mut self, role: TextRole, x: f32, size: f32, color: Rgb, text: &str) {
        for (i, line) in wrap_text(text, size, RIGHT_EDGE - x).into_iter().enumerate() {
            if i > 0 {
                self.advance(LINE_STEP);
            }
            self.text(role, x, size, color, line);
        }
    }

    fn centered(&mut self, role: TextRole, y: f32, size: f32, color: Rgb, text: &str) {
        self.push(Mark::Text {
            role,
            x: PAGE_WIDTH_MM / 2.0,
            y,
            size,
            color,
            align: Align::Center,
            text: text.to_string(),
        });
    }

    fn rule(&mut self, color: Rgb) {
        let y = self.y;
        self.push(Mark::Rule {
            x1: LEFT_MARGIN,
            x2: RIGHT_EDGE,
            y,
            color,
        });
    }

    fn finish(mut self) -> Vec<ReportPage> {
        for page in &mut self.pages {
            page.marks.push(Mark::Text {
                role: TextRole::Footer,
                x: PAGE_WIDTH_MM / 2.0,
                y: FOOTER_Y,
                size: 8.0,
                color: FOOTER_GRAY,
                align: Align::Center,
                text: FOOTER_CAPTION.to_string(),
            });
        }
        self.pages
    }
}

/// Timestamp as shown in the report body, e.g. `10/17/2026, 3:04:05 PM`.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Lay out the report for `result` and its interpreted `diagnosis`.
pub fn layout_report(
    result: &ClassificationResult,
    diagnosis: &Diagnosis,
    generated_at: &NaiveDateTime,
) -> ReportLayout {
    let mut cursor = Cursor::new();

    // Title block
    cursor.centered(TextRole::Title, 20.0, 20.0, GREEN, REPORT_TITLE);
    cursor.move_to(25.0);
    cursor.rule(GREEN);

    // Service-reported prediction
    cursor.move_to(40.0);
    cursor.wrapped(
        TextRole::Summary,
        LEFT_MARGIN,
        16.0,
        BLACK,
        &format!("Predicted Disease: {}", result.predicted_label),
    );
    cursor.advance(LINE_STEP);
    cursor.text(
        TextRole::Summary,
        LEFT_MARGIN,
        16.0,
        BLACK,
        format!("Confidence Level: {}%", result.confidence),
    );

    // Distribution, one entry per line in service order
    cursor.advance(20.0);
    cursor.text(
        TextRole::Heading,
        LEFT_MARGIN,
        14.0,
        BLACK,
        "Probability Distribution:".to_string(),
    );
    for (label, p) in result.probabilities.iter() {
        cursor.advance(LINE_STEP);
        cursor.wrapped(TextRole::LineItem, INDENT, 12.0, BLACK, &format!("{}: {}%", label, p));
    }

    // Treatment
    cursor.advance(LINE_STEP + 15.0);
    cursor.text(
        TextRole::Heading,
        LEFT_MARGIN,
        14.0,
        GREEN,
        "Recommended Treatment:".to_string(),
    );
    cursor.advance(LINE_STEP);
    cursor.wrapped(
        TextRole::Treatment,
        LEFT_MARGIN,
        12.0,
        BLACK,
        &format!("Condition: {}", diagnosis.condition_label),
    );
    cursor.advance(LINE_STEP);
    cursor.text(
        TextRole::Treatment,
        LEFT_MARGIN,
        12.0,
        BLACK,
        format!("Confidence: {}%", diagnosis.severity_percentage),
    );
    cursor.advance(LINE_STEP);
    cursor.text(
        TextRole::Treatment,
        LEFT_MARGIN,
        12.0,
        BLACK,
        "Treatment Plan:".to_string(),
    );
    cursor.advance(LINE_STEP);
    cursor.wrapped(TextRole::Treatment, INDENT, 12.0, BLACK, &diagnosis.treatment_text);

    // Closing rule and timestamp
    cursor.advance(LINE_STEP);
    cursor.rule(RULE_GRAY);
    cursor.advance(15.0);
    cursor.text(
        TextRole::Timestamp,
        LEFT_MARGIN,
        10.0,
        STAMP_GRAY,
        format!("Report Generated: {}", format_timestamp(generated_at)),
    );

    ReportLayout {
        pages: cursor.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::interpret;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(15, 4, 5)
            .unwrap()
    }

    fn result_with(entries: Vec<(String, f64)>) -> ClassificationResult {
        ClassificationResult {
            predicted_label: entries[0].0.clone(),
            confidence: entries[0].1,
            probabilities: entries.into_iter().collect(),
            image_url: None,
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&at()), "10/17/2026, 3:04:05 PM");
    }

    #[test]
    fn test_regions_present_on_single_page() {
        let result = result_with(vec![
            ("Powdery mildew".to_string(), 25.0),
            ("Healthy".to_string(), 10.0),
        ]);
        let diagnosis = interpret(&result.probabilities).unwrap();
        let layout = layout_report(&result, &diagnosis, &at());

        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.texts(TextRole::Title), vec![REPORT_TITLE]);
        assert_eq!(
            layout.texts(TextRole::Summary),
            vec!["Predicted Disease: Powdery mildew", "Confidence Level: 25%"]
        );
        assert_eq!(
            layout.texts(TextRole::LineItem),
            vec!["Powdery mildew: 25%", "Healthy: 10%"]
        );
        assert_eq!(
            layout.texts(TextRole::Timestamp),
            vec!["Report Generated: 10/17/2026, 3:04:05 PM"]
        );
        assert_eq!(layout.texts(TextRole::Footer), vec![FOOTER_CAPTION]);

        let treatment = layout.texts(TextRole::Treatment);
        assert_eq!(treatment[0], "Condition: Powdery Mildew");
        assert_eq!(treatment[1], "Confidence: 25%");
        assert_eq!(treatment[3], "Early Stage Treatment:");
    }

    #[test]
    fn test_long_distribution_paginates_with_footer_on_each_page() {
        let entries: Vec<_> = (0..40).map(|i| (format!("Condition {}", i), i as f64)).collect();
        let result = result_with(entries);
        let diagnosis = interpret(&result.probabilities).unwrap();
        let layout = layout_report(&result, &diagnosis, &at());

        assert!(layout.pages.len() >= 2);
        assert_eq!(layout.texts(TextRole::Footer).len(), layout.pages.len());
        assert_eq!(layout.texts(TextRole::LineItem).len(), 40);

        for page in &layout.pages {
            for mark in &page.marks {
                if let Mark::Text { role, y, .. } = mark {
                    if *role != TextRole::Footer {
                        assert!(*y <= BODY_LIMIT, "body text in footer band at {}", y);
                    }
                }
            }
        }
    }

    fn assert_within_right_edge(layout: &ReportLayout) {
        for page in &layout.pages {
            for mark in &page.marks {
                if let Mark::Text { size, text, .. } = mark {
                    let left = mark.text_origin_x().unwrap();
                    let right = left + text_width_mm(text, *size);
                    assert!(right <= RIGHT_EDGE + 1e-3, "runs to {}mm: {}", right, text);
                }
            }
        }
    }

    #[test]
    fn test_treatment_lines_fit_content_width() {
        let result = result_with(vec![("Powdery mildew".to_string(), 45.0)]);
        let diagnosis = interpret(&result.probabilities).unwrap();
        let layout = layout_report(&result, &diagnosis, &at());

        for text in layout.texts(TextRole::Treatment) {
            assert!(text_width_mm(text, 12.0) <= CONTENT_WIDTH_MM, "too wide: {}", text);
        }
        assert_within_right_edge(&layout);
    }

    #[test]
    fn test_long_labels_wrap_inside_right_edge() {
        let long = "Severe bacterial blight with secondary fungal infection along the leaf margins and veins".to_string();
        let result = result_with(vec![(long.clone(), 88.0), ("Healthy".to_string(), 12.0)]);
        let diagnosis = interpret(&result.probabilities).unwrap();
        let layout = layout_report(&result, &diagnosis, &at());

        assert_within_right_edge(&layout);

        let summary = layout.texts(TextRole::Summary);
        assert!(summary.len() > 2, "summary should wrap: {:?}", summary);
        assert!(summary[0].starts_with("Predicted Disease: Severe"));
        assert_eq!(summary.last(), Some(&"Confidence Level: 88%"));

        let items = layout.texts(TextRole::LineItem);
        assert!(items.len() > 2, "line item should wrap: {:?}", items);
        assert_eq!(items.last(), Some(&"Healthy: 12%"));
        assert_eq!(items[..items.len() - 1].join(" "), format!("{}: 88%", long));
    }

    #[test]
    fn test_title_is_centered() {
        let result = result_with(vec![("Healthy".to_string(), 99.0)]);
        let diagnosis = interpret(&result.probabilities).unwrap();
        let layout = layout_report(&result, &diagnosis, &at());

        let title = &layout.pages[0].marks[0];
        let left = title.text_origin_x().unwrap();
        let width = text_width_mm(REPORT_TITLE, 20.0);
        assert!((left + width / 2.0 - PAGE_WIDTH_MM / 2.0).abs() < 1e-3);
    }
}
