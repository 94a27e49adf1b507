//! PDF rendering of a `ReportLayout` using lopdf.
//!
//! Only the standard Type1 Helvetica font is referenced, so rendering needs no
//! external resources.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat, Stream};

use super::layout::{Mark, ReportLayout, ReportPage, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use super::metrics::PT_PER_MM;
use super::ReportError;

const FONT_NAME: &str = "F1";
const RULE_WIDTH_PT: f32 = 0.57;

/// Encode text for a WinAnsiEncoding font.
///
/// The base Helvetica font only has glyphs for WinAnsi, so anything outside
/// it (for example a service label in a non-Latin script) is drawn as '?'.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn to_pt_x(mm: f32) -> f32 {
    mm * PT_PER_MM
}

fn to_pt_y(mm_from_top: f32) -> f32 {
    (PAGE_HEIGHT_MM - mm_from_top) * PT_PER_MM
}

fn color_operands(c: Rgb) -> Vec<Object> {
    [c.0, c.1, c.2]
        .iter()
        .map(|v| (*v as f32 / 255.0).into())
        .collect()
}

fn page_operations(page: &ReportPage) -> Vec<Operation> {
    let mut ops = Vec::new();

    for mark in &page.marks {
        match mark {
            Mark::Text {
                y, size, color, text, ..
            } => {
                let x = mark.text_origin_x().unwrap_or_default();
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![FONT_NAME.into(), (*size).into()],
                ));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "Td",
                    vec![to_pt_x(x).into(), to_pt_y(*y).into()],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            Mark::Rule { x1, x2, y, color } => {
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![RULE_WIDTH_PT.into()]));
                ops.push(Operation::new(
                    "m",
                    vec![to_pt_x(*x1).into(), to_pt_y(*y).into()],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![to_pt_x(*x2).into(), to_pt_y(*y).into()],
                ));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }

    ops
}

/// Render every page of `layout` into a single PDF document.
pub fn render_pdf(layout: &ReportLayout, title: &str) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_NAME => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::Pdf(format!("Failed to encode page content: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        to_pt_x(PAGE_WIDTH_MM).into(),
        to_pt_x(PAGE_HEIGHT_MM).into(),
    ];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal("LeafDx"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ReportError::Pdf(format!("Failed to write PDF: {}", e)))?;
    Ok(bytes)
}
