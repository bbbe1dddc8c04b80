//! Serializes a [`Document`] to PDF bytes.

use anyhow::Context as _;
use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, StringFormat, dictionary};

use crate::document::{Document, DrawOp, LinkArea, Rule, TextRun};
use crate::fonts::FontFace;
use crate::geometry::mm_to_pt;
use crate::winansi;

#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

pub fn encode_pdf(doc: &Document, info: &DocumentInfo) -> anyhow::Result<Vec<u8>> {
    let mut pdf = lopdf::Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let height = doc.geometry.height;
    let mut kids = Vec::with_capacity(doc.pages.len());
    for (index, page) in doc.pages.iter().enumerate() {
        let mut operations = Vec::new();
        let mut annotations = Vec::new();
        for op in &page.ops {
            match op {
                DrawOp::Text(run) => text_ops(run, height, &mut operations),
                DrawOp::Rule(rule) => rule_ops(rule, height, &mut operations),
                DrawOp::Link(link) => annotations.push(Object::Dictionary(link_annotation(link, height))),
            }
        }

        let content = Content { operations }
            .encode()
            .with_context(|| format!("encode content of page {}", index + 1))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content));
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if !annotations.is_empty() {
            page_dict.set("Annots", annotations);
        }
        kids.push(Object::Reference(pdf.add_object(page_dict)));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.0.into(),
            0.0.into(),
            mm_to_pt(doc.geometry.width).into(),
            mm_to_pt(doc.geometry.height).into(),
        ],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = pdf.add_object(dictionary! {
        "Title" => pdf_string(&info.title),
        "Author" => pdf_string(&info.author),
        "Producer" => Object::string_literal("JobPulse"),
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut out = Vec::new();
    pdf.save_to(&mut out).context("write pdf")?;
    Ok(out)
}

fn pdf_string(text: &str) -> Object {
    Object::String(winansi::encode(text), StringFormat::Literal)
}

fn text_ops(run: &TextRun, page_height: f32, out: &mut Vec<Operation>) {
    let [r, g, b] = run.style.color.components();
    out.push(Operation::new("BT", vec![]));
    out.push(Operation::new(
        "Tf",
        vec![run.style.face.resource_name().into(), run.style.size.into()],
    ));
    out.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    out.push(Operation::new("Tw", vec![mm_to_pt(run.word_spacing).into()]));
    out.push(Operation::new(
        "Td",
        vec![mm_to_pt(run.x).into(), mm_to_pt(page_height - run.y).into()],
    ));
    out.push(Operation::new("Tj", vec![pdf_string(&run.text)]));
    out.push(Operation::new("ET", vec![]));
}

fn rule_ops(rule: &Rule, page_height: f32, out: &mut Vec<Operation>) {
    let [r, g, b] = rule.color.components();
    out.push(Operation::new("q", vec![]));
    out.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
    out.push(Operation::new("w", vec![mm_to_pt(rule.width).into()]));
    out.push(Operation::new(
        "m",
        vec![mm_to_pt(rule.x1).into(), mm_to_pt(page_height - rule.y1).into()],
    ));
    out.push(Operation::new(
        "l",
        vec![mm_to_pt(rule.x2).into(), mm_to_pt(page_height - rule.y2).into()],
    ));
    out.push(Operation::new("S", vec![]));
    out.push(Operation::new("Q", vec![]));
}

fn link_annotation(link: &LinkArea, page_height: f32) -> lopdf::Dictionary {
    // Rect is lower-left then upper-right in PDF space.
    let rect: Vec<Object> = vec![
        mm_to_pt(link.x).into(),
        mm_to_pt(page_height - link.y - link.height).into(),
        mm_to_pt(link.x + link.width).into(),
        mm_to_pt(page_height - link.y).into(),
    ];
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect,
        "Border" => vec![Object::Integer(0); 3],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(link.url.as_str()),
        },
    }
}
