//! # PDF Writer
//!
//! Writes a composition as a single-page PDF 1.7 file.
//!
//! The writer emits raw PDF objects itself, with no PDF library. A single
//! page needs only a handful of objects:
//!
//! ```text
//! %PDF-1.7
//! 1 0 obj Catalog      2 0 obj Pages       3 0 obj Page
//! 4 0 obj Contents (FlateDecode)           5..8 Helvetica faces
//! 9 0 obj Info
//! xref / trailer / %%EOF
//! ```
//!
//! The content stream starts with one `cm` that flips the y axis, so every
//! drawing operator below works in the same top-down coordinates as the
//! composition. Text matrices flip back so glyphs stay upright.
//!
//! Text uses the standard Helvetica faces in WinAnsiEncoding. Characters
//! outside WinAnsi become `?`; the SVG output is the faithful one for
//! non-Latin verses.

use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use crate::blocks::DecorativeBlock;
use crate::error::Result;
use crate::model::{CanvasSize, Metadata};
use crate::style::{fmt_num, Background, Color, FrameStyle};
use crate::surface::{Canvas, Colophon, TextFragment};
use crate::text::Fragment;
use crate::texture::{LineSegment, WashPanel};
use miniz_oxide::deflate::compress_to_vec_zlib;

/// Resource names of the four standard faces, indexed by `bold | italic << 1`.
const FONTS: [(&str, &str); 4] = [
    ("F0", "Helvetica"),
    ("F1", "Helvetica-Bold"),
    ("F2", "Helvetica-Oblique"),
    ("F3", "Helvetica-BoldOblique"),
];

fn font_name(bold: bool, italic: bool) -> &'static str {
    FONTS[bold as usize | (italic as usize) << 1].0
}

/// Builds the page content stream, then the file.
pub struct PdfWriter {
    canvas: CanvasSize,
    metadata: Metadata,
    stream: String,
    /// Distinct alpha states in use, in thousandths. Index `i` is `/GSi`.
    alphas: Vec<(AlphaTarget, u32)>,
    /// Fill and stroke alpha in effect inside the current `q`/`Q` block.
    fill_alpha: u32,
    stroke_alpha: u32,
    /// Axial shading for a gradient background.
    shading: Option<(Color, Color)>,
}

/// Which operators an ExtGState alpha applies to: `/ca` fills, `/CA` strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlphaTarget {
    Fill,
    Stroke,
}

const OPAQUE: u32 = 1000;

struct PdfObject {
    data: Vec<u8>,
}

impl PdfWriter {
    pub fn new(canvas: CanvasSize, metadata: &Metadata) -> Self {
        let mut stream = String::new();
        let _ = writeln!(stream, "1 0 0 -1 0 {} cm", fmt_num(canvas.height));
        Self {
            canvas,
            metadata: metadata.clone(),
            stream,
            alphas: Vec::new(),
            fill_alpha: OPAQUE,
            stroke_alpha: OPAQUE,
            shading: None,
        }
    }

    fn save(&mut self) {
        self.stream.push_str("q\n");
    }

    /// `Q` restores the page state, which is always opaque.
    fn restore(&mut self) {
        self.stream.push_str("Q\n");
        self.fill_alpha = OPAQUE;
        self.stroke_alpha = OPAQUE;
    }

    /// Select `alpha` for `target` only, leaving the other alpha alone.
    fn set_alpha(&mut self, target: AlphaTarget, alpha: f64) {
        let key = (alpha.clamp(0.0, 1.0) * 1000.0).round() as u32;
        let current = match target {
            AlphaTarget::Fill => &mut self.fill_alpha,
            AlphaTarget::Stroke => &mut self.stroke_alpha,
        };
        if *current == key {
            return;
        }
        *current = key;
        let index = match self.alphas.iter().position(|s| *s == (target, key)) {
            Some(i) => i,
            None => {
                self.alphas.push((target, key));
                self.alphas.len() - 1
            }
        };
        let _ = writeln!(self.stream, "/GS{} gs", index);
    }

    fn set_fill(&mut self, color: Color) {
        let (r, g, b) = color.unit_rgb();
        let _ = writeln!(self.stream, "{} {} {} rg", fmt_num(r), fmt_num(g), fmt_num(b));
        self.set_alpha(AlphaTarget::Fill, color.a);
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        let (r, g, b) = color.unit_rgb();
        let _ = writeln!(
            self.stream,
            "{} {} {} RG\n{} w",
            fmt_num(r),
            fmt_num(g),
            fmt_num(b),
            fmt_num(width)
        );
        self.set_alpha(AlphaTarget::Stroke, color.a);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let _ = writeln!(
            self.stream,
            "{} {} {} {} re",
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h)
        );
    }

    /// Rotate the CTM by `degrees` about `(cx, cy)`, clockwise on the page.
    fn rotate_about(&mut self, degrees: f64, cx: f64, cy: f64) {
        if degrees == 0.0 {
            return;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let _ = writeln!(
            self.stream,
            "1 0 0 1 {cx} {cy} cm\n{c} {s} {ns} {c} 0 0 cm\n1 0 0 1 {ncx} {ncy} cm",
            cx = fmt_num(cx),
            cy = fmt_num(cy),
            c = fmt_num_precise(cos),
            s = fmt_num_precise(sin),
            ns = fmt_num_precise(-sin),
            ncx = fmt_num(-cx),
            ncy = fmt_num(-cy),
        );
    }

    /// Start a text object positioned at a baseline, glyphs upright.
    fn begin_text(&mut self, font: &str, size: f64, x: f64, baseline: f64) {
        let _ = writeln!(
            self.stream,
            "BT\n/{} {} Tf\n1 0 0 -1 {} {} Tm",
            font,
            fmt_num(size),
            fmt_num(x),
            fmt_num(baseline)
        );
    }

    fn show(&mut self, text: &str) {
        let _ = writeln!(self.stream, "({}) Tj", encode_winansi(text));
    }

    fn resources(&self) -> String {
        let mut res = String::from("/Font <<");
        for (i, (name, _)) in FONTS.iter().enumerate() {
            let _ = write!(res, " /{} {} 0 R", name, 5 + i);
        }
        res.push_str(" >>");
        if !self.alphas.is_empty() {
            res.push_str(" /ExtGState <<");
            for (i, (target, a)) in self.alphas.iter().enumerate() {
                let key = match target {
                    AlphaTarget::Fill => "ca",
                    AlphaTarget::Stroke => "CA",
                };
                let _ = write!(res, " /GS{} << /{} {} >>", i, key, fmt_num(*a as f64 / 1000.0));
            }
            res.push_str(" >>");
        }
        if let Some((top, bottom)) = self.shading {
            let (r0, g0, b0) = top.unit_rgb();
            let (r1, g1, b1) = bottom.unit_rgb();
            let _ = write!(
                res,
                " /Shading << /Sh0 << /ShadingType 2 /ColorSpace /DeviceRGB \
                 /Coords [0 0 0 {}] /Function << /FunctionType 2 /Domain [0 1] \
                 /C0 [{} {} {}] /C1 [{} {} {}] /N 1 >> /Extend [true true] >> >>",
                fmt_num(self.canvas.height),
                fmt_num(r0),
                fmt_num(g0),
                fmt_num(b0),
                fmt_num(r1),
                fmt_num(g1),
                fmt_num(b1),
            );
        }
        res
    }

    fn info_dict(&self) -> String {
        let mut info = String::from("<< ");
        let _ = write!(info, "/Title (Verso) ");
        if let Some(author) = &self.metadata.author {
            let _ = write!(info, "/Author {} ", pdf_text_string(author));
        }
        if let Some(source) = &self.metadata.source {
            let _ = write!(info, "/Subject {} ", pdf_text_string(source));
        }
        if let Some(tools) = &self.metadata.tools {
            let _ = write!(info, "/Creator {} ", pdf_text_string(tools));
        }
        info.push_str("/Producer (Verso 0.1) >>");
        info
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(objects: &[PdfObject], info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; objects.len() + 1];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in objects.iter().enumerate() {
            let id = i + 1;
            offsets[id] = output.len();
            let _ = write!(output, "{} 0 obj\n", id);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let size = objects.len() + 1;
        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", size);
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, info_obj_id, xref_offset
        );
        output
    }
}

/// Six decimals, for rotation matrices where three would drift visibly.
fn fmt_num_precise(v: f64) -> String {
    let s = format!("{:.6}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape special characters in a PDF literal string.
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

/// A document text string: a literal for ASCII, UTF-16BE hex with a BOM otherwise.
fn pdf_text_string(s: &str) -> String {
    if s.is_ascii() {
        return format!("({})", escape_pdf_string(s));
    }
    let mut out = String::from("<FEFF");
    for unit in s.encode_utf16() {
        let _ = write!(out, "{:04X}", unit);
    }
    out.push('>');
    out
}

/// Encode text for a WinAnsi literal string, escaping as needed.
fn encode_winansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let b = unicode_to_winansi(ch).unwrap_or(b'?');
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte.
///
/// 0x20..=0x7E and 0xA0..=0xFF map directly; 0x80..=0x9F hold the
/// Windows-1252 punctuation.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

impl Canvas for PdfWriter {
    type Output = Vec<u8>;

    fn fill_background(&mut self, canvas: CanvasSize, background: &Background) -> Result<()> {
        match background {
            Background::Solid { color } => {
                self.save();
                self.set_fill(*color);
                self.rect(0.0, 0.0, canvas.width, canvas.height);
                self.stream.push_str("f\n");
                self.restore();
            }
            Background::VerticalGradient { top, bottom } => {
                self.shading = Some((*top, *bottom));
                self.save();
                self.rect(0.0, 0.0, canvas.width, canvas.height);
                self.stream.push_str("W n\n/Sh0 sh\n");
                self.restore();
            }
        }
        Ok(())
    }

    fn draw_wash(&mut self, panel: &WashPanel) -> Result<()> {
        self.save();
        self.rotate_about(
            panel.rotation_degrees,
            panel.x + panel.width / 2.0,
            panel.y + panel.height / 2.0,
        );
        self.set_fill(panel.fill);
        self.rect(panel.x, panel.y, panel.width, panel.height);
        self.stream.push_str("f\n");
        if let Some(outline) = panel.outline {
            self.set_stroke(outline.color, outline.width);
            self.rect(panel.x, panel.y, panel.width, panel.height);
            self.stream.push_str("S\n");
        }
        self.restore();
        Ok(())
    }

    fn draw_line(&mut self, segment: &LineSegment) -> Result<()> {
        self.save();
        self.set_stroke(segment.stroke, segment.stroke_width);
        let _ = writeln!(
            self.stream,
            "{} {} m\n{} {} l\nS",
            fmt_num(segment.x1),
            fmt_num(segment.y1),
            fmt_num(segment.x2),
            fmt_num(segment.y2)
        );
        self.restore();
        Ok(())
    }

    fn draw_text(&mut self, fragment: &TextFragment<'_>) -> Result<()> {
        let style = fragment.verse.style;
        let font = font_name(style.bold, style.italic);
        let (cx, cy) = fragment.centre;

        self.save();
        self.rotate_about(style.rotation_degrees, cx, cy);
        self.set_fill(fragment.color);
        for line in fragment.lines {
            self.begin_text(font, fragment.font_size, line.x, line.baseline);
            let _ = writeln!(
                self.stream,
                "{} Tc\n{} Tw",
                fmt_num(style.letter_spacing),
                fmt_num(line.word_spacing())
            );
            for piece in fragment.verse.verse.fragments_in(line.range.clone()) {
                match piece {
                    Fragment::Plain(s) => self.show(s),
                    Fragment::Highlight(s) => {
                        self.set_fill(fragment.highlight);
                        self.show(s);
                        self.set_fill(fragment.color);
                    }
                }
            }
            self.stream.push_str("ET\n");
        }
        self.restore();
        Ok(())
    }

    fn draw_frame(&mut self, canvas: CanvasSize, frame: &FrameStyle) -> Result<()> {
        self.save();
        self.set_stroke(frame.stroke, frame.stroke_width);
        self.rect(
            frame.inset,
            frame.inset,
            canvas.width - 2.0 * frame.inset,
            canvas.height - 2.0 * frame.inset,
        );
        self.stream.push_str("S\n");
        self.restore();
        Ok(())
    }

    fn draw_colophon(&mut self, colophon: &Colophon) -> Result<()> {
        self.save();
        self.set_fill(colophon.fill);
        self.set_stroke(colophon.border, 1.0);
        self.rect(colophon.x, colophon.y, colophon.width, colophon.height);
        self.stream.push_str("B\n");
        self.restore();

        for (i, (label, value)) in colophon.entries.iter().enumerate() {
            self.save();
            self.begin_text(
                font_name(true, false),
                colophon.font_size,
                colophon.x + colophon.padding,
                colophon.baseline(i),
            );
            self.set_fill(colophon.label);
            self.show(label);
            let _ = writeln!(
                self.stream,
                "/{} {} Tf",
                font_name(false, false),
                fmt_num(colophon.font_size)
            );
            self.set_fill(colophon.text);
            self.show(&format!(" {}", value));
            self.stream.push_str("ET\n");
            self.restore();
        }
        Ok(())
    }

    fn draw_rect(&mut self, block: &DecorativeBlock) -> Result<()> {
        self.save();
        self.set_fill(block.base_color);
        self.rect(block.x, block.y, block.width, block.height);
        self.stream.push_str("f\n");
        self.restore();

        let cx = block.x + block.width / 2.0;
        let cy = block.y + block.height / 2.0;
        let half = block.width.hypot(block.height) / 2.0;

        for layer in block.texture.iter().rev() {
            if layer.spacing <= 0.0 {
                continue;
            }
            self.save();
            self.rect(block.x, block.y, block.width, block.height);
            self.stream.push_str("W n\n");
            self.rotate_about(layer.rotation_degrees - 90.0, cx, cy);
            self.set_fill(layer.color.with_alpha(layer.opacity));
            let stripes = (2.0 * half / layer.spacing).ceil() as usize + 1;
            for i in 0..stripes {
                let x = cx - half + i as f64 * layer.spacing;
                self.rect(x, cy - half, layer.stroke_width, 2.0 * half);
            }
            self.stream.push_str("f\n");
            self.restore();
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut objects: Vec<PdfObject> = Vec::with_capacity(9);
        objects.push(PdfObject {
            data: b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        });
        objects.push(PdfObject {
            data: b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        });
        objects.push(PdfObject {
            data: format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Contents 4 0 R /Resources << {} >> >>",
                fmt_num(self.canvas.width),
                fmt_num(self.canvas.height),
                self.resources()
            )
            .into_bytes(),
        });

        let compressed = compress_to_vec_zlib(self.stream.as_bytes(), 6);
        let mut content: Vec<u8> = Vec::new();
        let _ = write!(
            content,
            "<< /Length {} /Filter /FlateDecode >>\nstream\n",
            compressed.len()
        );
        content.extend_from_slice(&compressed);
        content.extend_from_slice(b"\nendstream");
        objects.push(PdfObject { data: content });

        for (_, base) in FONTS {
            objects.push(PdfObject {
                data: format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    base
                )
                .into_bytes(),
            });
        }

        objects.push(PdfObject {
            data: self.info_dict().into_bytes(),
        });
        let info_id = objects.len();
        tracing::debug!(
            objects = objects.len(),
            stream_bytes = self.stream.len(),
            "serializing PDF"
        );
        Ok(Self::serialize(&objects, info_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Theme;
    use miniz_oxide::inflate::decompress_to_vec_zlib;

    fn canvas() -> CanvasSize {
        CanvasSize {
            width: 200.0,
            height: 100.0,
        }
    }

    fn content_of(pdf: &[u8]) -> String {
        let start = pdf.windows(7).position(|w| w == b"stream\n").unwrap() + 7;
        let end = pdf.windows(10).position(|w| w == b"\nendstream").unwrap();
        String::from_utf8(decompress_to_vec_zlib(&pdf[start..end]).unwrap()).unwrap()
    }

    #[test]
    fn escapes_literal_strings() {
        assert_eq!(escape_pdf_string("Hello (World)"), "Hello \\(World\\)");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn winansi_replaces_unmappable() {
        assert_eq!(encode_winansi("Čapek"), "?apek");
        assert_eq!(encode_winansi("café"), "caf\\351");
        assert_eq!(encode_winansi("“robot”"), "\\223robot\\224");
        assert_eq!(encode_winansi("ロボット"), "????");
    }

    #[test]
    fn empty_page_is_well_formed() {
        let bytes = PdfWriter::new(canvas(), &Metadata::default()).finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox [0 0 200 100]"));
        assert!(text.contains("/BaseFont /Helvetica-BoldOblique"));
        assert!(text.contains("xref\n0 10\n"));
        assert!(text.contains("/Info 9 0 R"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = PdfWriter::new(canvas(), &Metadata::default()).finish().unwrap();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let xref = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take(9)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.iter().enumerate() {
            let header = format!("{} 0 obj", i + 1);
            assert_eq!(&bytes[*offset..*offset + header.len()], header.as_bytes());
        }
    }

    #[test]
    fn y_axis_is_flipped_once() {
        let bytes = PdfWriter::new(canvas(), &Metadata::default()).finish().unwrap();
        assert!(content_of(&bytes).starts_with("1 0 0 -1 0 100 cm\n"));
    }

    #[test]
    fn translucency_uses_ext_gstate() {
        let mut pdf = PdfWriter::new(canvas(), &Metadata::default());
        let line = |alpha| LineSegment {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
            stroke: Color::rgb(0, 0, 0).with_alpha(alpha),
            stroke_width: 0.5,
            tier: crate::texture::LineTier::Accent,
        };
        pdf.draw_line(&line(0.5)).unwrap();
        pdf.draw_line(&line(0.5)).unwrap();
        pdf.draw_line(&line(0.25)).unwrap();
        let bytes = pdf.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/GS0 << /CA 0.5 >>"));
        assert!(text.contains("/GS1 << /CA 0.25 >>"));
        assert!(!text.contains("/GS2"));
    }

    #[test]
    fn colophon_fill_keeps_its_own_alpha() {
        let frame = Theme::blueprint().frame.unwrap();
        let colophon = Colophon::new(
            CanvasSize {
                width: 3200.0,
                height: 2400.0,
            },
            &frame,
            &Metadata::default(),
            42,
        );
        let mut pdf = PdfWriter::new(canvas(), &Metadata::default());
        pdf.draw_colophon(&colophon).unwrap();
        let bytes = pdf.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        let fill = fmt_num((colophon.fill.a * 1000.0).round() / 1000.0);
        let border = fmt_num((colophon.border.a * 1000.0).round() / 1000.0);
        assert!(text.contains(&format!("/GS0 << /ca {} >>", fill)));
        assert!(text.contains(&format!("/GS1 << /CA {} >>", border)));

        let content = content_of(&bytes);
        let box_ops = &content[..content.find("B\n").unwrap()];
        assert!(box_ops.contains("/GS0 gs"));
        assert!(box_ops.contains("/GS1 gs"));
    }

    #[test]
    fn opaque_fill_after_translucent_resets_alpha() {
        let mut pdf = PdfWriter::new(canvas(), &Metadata::default());
        pdf.save();
        pdf.set_fill(Color::rgb(0, 0, 0).with_alpha(0.5));
        pdf.set_fill(Color::rgb(0, 0, 0));
        pdf.restore();
        let bytes = pdf.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/GS0 << /ca 0.5 >>"));
        assert!(text.contains("/GS1 << /ca 1 >>"));
    }

    #[test]
    fn gradient_background_uses_shading() {
        let mut pdf = PdfWriter::new(canvas(), &Metadata::default());
        pdf.fill_background(canvas(), &Theme::blueprint().background)
            .unwrap();
        let bytes = pdf.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/ShadingType 2"));
        assert!(content_of(&bytes).contains("/Sh0 sh"));
    }

    #[test]
    fn metadata_lands_in_info() {
        let metadata = Metadata {
            author: Some("lit".into()),
            source: Some("R.U.R. (1920)".into()),
            ..Default::default()
        };
        let bytes = PdfWriter::new(canvas(), &metadata).finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Author (lit)"));
        assert!(text.contains("/Subject (R.U.R. \\(1920\\))"));
    }

    #[test]
    fn non_ascii_metadata_is_utf16() {
        assert_eq!(pdf_text_string("Karel"), "(Karel)");
        assert_eq!(pdf_text_string("Čapek"), "<FEFF010C006100700065006B>");

        let metadata = Metadata {
            author: Some("Karel Čapek".into()),
            ..Default::default()
        };
        let bytes = PdfWriter::new(canvas(), &metadata).finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Author <FEFF004B006100720065006C0020010C006100700065006B>"));
    }

    #[test]
    fn font_names_by_style() {
        assert_eq!(font_name(false, false), "F0");
        assert_eq!(font_name(true, false), "F1");
        assert_eq!(font_name(false, true), "F2");
        assert_eq!(font_name(true, true), "F3");
    }
}
