//! # SVG Writer
//!
//! Serializes a composition as a standalone SVG document with quick-xml.
//!
//! Colors with alpha are written as a hex color plus `*-opacity`, which every
//! renderer understands. Grid layers become `<pattern>`s of a single stripe,
//! rotated by `angle - 90` so that a 90° layer gives vertical stripes and a
//! 0° layer horizontal ones. They are painted last-to-first so layer 0 ends up
//! on top.

use crate::blocks::DecorativeBlock;
use crate::error::{Result, VersoError};
use crate::model::CanvasSize;
use crate::style::{fmt_num, Background, Color, FrameStyle};
use crate::surface::{Canvas, Colophon, TextFragment};
use crate::text::Fragment;
use crate::texture::{LineSegment, WashPanel};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const HIGHLIGHT_CLASS: &str = "robot-highlight";

/// Accumulates SVG markup. Obtain the document with [`Canvas::finish`].
pub struct SvgWriter {
    writer: Writer<Vec<u8>>,
    blocks: usize,
}

type Attrs<'a> = Vec<(&'a str, String)>;

impl SvgWriter {
    pub fn new(canvas: CanvasSize) -> Result<Self> {
        let mut svg = Self {
            writer: Writer::new(Vec::new()),
            blocks: 0,
        };
        svg.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        svg.open(
            "svg",
            vec![
                ("xmlns", SVG_NS.to_string()),
                ("width", fmt_num(canvas.width)),
                ("height", fmt_num(canvas.height)),
                (
                    "viewBox",
                    format!("0 0 {} {}", fmt_num(canvas.width), fmt_num(canvas.height)),
                ),
            ],
        )?;
        Ok(svg)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| VersoError::Render(format!("SVG write failed: {}", e)))
    }

    fn start<'a>(name: &'a str, attrs: &[(&str, String)]) -> BytesStart<'a> {
        let mut el = BytesStart::new(name);
        for (key, value) in attrs {
            el.push_attribute((*key, value.as_str()));
        }
        el
    }

    fn open(&mut self, name: &str, attrs: Attrs<'_>) -> Result<()> {
        self.event(Event::Start(Self::start(name, &attrs)))
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: Attrs<'_>) -> Result<()> {
        self.event(Event::Empty(Self::start(name, &attrs)))
    }

    fn text(&mut self, content: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(content)))
    }
}

/// `fill`/`stroke` plus its opacity when translucent.
fn paint_attrs<'a>(attrs: &mut Attrs<'a>, property: &'a str, opacity: &'a str, color: Color) {
    attrs.push((property, color.to_hex()));
    if color.a < 1.0 {
        attrs.push((opacity, fmt_num(color.a)));
    }
}

fn rotate(degrees: f64, cx: f64, cy: f64) -> String {
    format!("rotate({} {} {})", fmt_num(degrees), fmt_num(cx), fmt_num(cy))
}

impl Canvas for SvgWriter {
    type Output = String;

    fn fill_background(&mut self, canvas: CanvasSize, background: &Background) -> Result<()> {
        let mut attrs = vec![
            ("x", "0".to_string()),
            ("y", "0".to_string()),
            ("width", fmt_num(canvas.width)),
            ("height", fmt_num(canvas.height)),
        ];
        match background {
            Background::Solid { color } => paint_attrs(&mut attrs, "fill", "fill-opacity", *color),
            Background::VerticalGradient { top, bottom } => {
                self.open("defs", vec![])?;
                self.open(
                    "linearGradient",
                    vec![
                        ("id", "background".to_string()),
                        ("x1", "0".to_string()),
                        ("y1", "0".to_string()),
                        ("x2", "0".to_string()),
                        ("y2", "1".to_string()),
                    ],
                )?;
                for (offset, color) in [("0", top), ("1", bottom)] {
                    let mut stop = vec![("offset", offset.to_string())];
                    paint_attrs(&mut stop, "stop-color", "stop-opacity", *color);
                    self.empty("stop", stop)?;
                }
                self.close("linearGradient")?;
                self.close("defs")?;
                attrs.push(("fill", "url(#background)".to_string()));
            }
        }
        self.empty("rect", attrs)
    }

    fn draw_wash(&mut self, panel: &WashPanel) -> Result<()> {
        let mut attrs = vec![
            ("x", fmt_num(panel.x)),
            ("y", fmt_num(panel.y)),
            ("width", fmt_num(panel.width)),
            ("height", fmt_num(panel.height)),
        ];
        paint_attrs(&mut attrs, "fill", "fill-opacity", panel.fill);
        if let Some(outline) = panel.outline {
            paint_attrs(&mut attrs, "stroke", "stroke-opacity", outline.color);
            attrs.push(("stroke-width", fmt_num(outline.width)));
        }
        attrs.push((
            "transform",
            rotate(
                panel.rotation_degrees,
                panel.x + panel.width / 2.0,
                panel.y + panel.height / 2.0,
            ),
        ));
        self.empty("rect", attrs)
    }

    fn draw_line(&mut self, segment: &LineSegment) -> Result<()> {
        let mut attrs = vec![
            ("x1", fmt_num(segment.x1)),
            ("y1", fmt_num(segment.y1)),
            ("x2", fmt_num(segment.x2)),
            ("y2", fmt_num(segment.y2)),
        ];
        paint_attrs(&mut attrs, "stroke", "stroke-opacity", segment.stroke);
        attrs.push(("stroke-width", fmt_num(segment.stroke_width)));
        self.empty("line", attrs)
    }

    fn draw_text(&mut self, fragment: &TextFragment<'_>) -> Result<()> {
        let style = &fragment.verse.style;
        let (cx, cy) = fragment.centre;
        let mut attrs = vec![
            ("transform", rotate(style.rotation_degrees, cx, cy)),
            ("font-family", fragment.font_family.to_string()),
            ("font-size", fmt_num(fragment.font_size)),
            ("letter-spacing", fmt_num(style.letter_spacing)),
        ];
        if style.bold {
            attrs.push(("font-weight", "bold".to_string()));
        }
        if style.italic {
            attrs.push(("font-style", "italic".to_string()));
        }
        paint_attrs(&mut attrs, "fill", "fill-opacity", fragment.color);
        self.open("g", attrs)?;

        for line in fragment.lines {
            let mut line_attrs = vec![("x", fmt_num(line.x)), ("y", fmt_num(line.baseline))];
            let word_spacing = line.word_spacing();
            if word_spacing > 0.0 {
                line_attrs.push(("word-spacing", fmt_num(word_spacing)));
            }
            self.open("text", line_attrs)?;
            for piece in fragment.verse.verse.fragments_in(line.range.clone()) {
                match piece {
                    Fragment::Plain(s) => self.text(s)?,
                    Fragment::Highlight(s) => {
                        let mut span = vec![("class", HIGHLIGHT_CLASS.to_string())];
                        paint_attrs(&mut span, "fill", "fill-opacity", fragment.highlight);
                        self.open("tspan", span)?;
                        self.text(s)?;
                        self.close("tspan")?;
                    }
                }
            }
            self.close("text")?;
        }

        self.close("g")
    }

    fn draw_frame(&mut self, canvas: CanvasSize, frame: &FrameStyle) -> Result<()> {
        let mut attrs = vec![
            ("x", fmt_num(frame.inset)),
            ("y", fmt_num(frame.inset)),
            ("width", fmt_num(canvas.width - 2.0 * frame.inset)),
            ("height", fmt_num(canvas.height - 2.0 * frame.inset)),
            ("fill", "none".to_string()),
        ];
        paint_attrs(&mut attrs, "stroke", "stroke-opacity", frame.stroke);
        attrs.push(("stroke-width", fmt_num(frame.stroke_width)));
        self.empty("rect", attrs)
    }

    fn draw_colophon(&mut self, colophon: &Colophon) -> Result<()> {
        let mut attrs = vec![
            ("x", fmt_num(colophon.x)),
            ("y", fmt_num(colophon.y)),
            ("width", fmt_num(colophon.width)),
            ("height", fmt_num(colophon.height)),
        ];
        paint_attrs(&mut attrs, "fill", "fill-opacity", colophon.fill);
        paint_attrs(&mut attrs, "stroke", "stroke-opacity", colophon.border);
        attrs.push(("stroke-width", "1".to_string()));
        self.empty("rect", attrs)?;

        let mut group = vec![
            ("font-family", "Helvetica".to_string()),
            ("font-size", fmt_num(colophon.font_size)),
        ];
        paint_attrs(&mut group, "fill", "fill-opacity", colophon.text);
        self.open("g", group)?;
        for (i, (label, value)) in colophon.entries.iter().enumerate() {
            self.open(
                "text",
                vec![
                    ("x", fmt_num(colophon.x + colophon.padding)),
                    ("y", fmt_num(colophon.baseline(i))),
                ],
            )?;
            let mut span = vec![("font-weight", "bold".to_string())];
            paint_attrs(&mut span, "fill", "fill-opacity", colophon.label);
            self.open("tspan", span)?;
            self.text(label)?;
            self.close("tspan")?;
            self.text(&format!(" {}", value))?;
            self.close("text")?;
        }
        self.close("g")
    }

    fn draw_rect(&mut self, block: &DecorativeBlock) -> Result<()> {
        let id = self.blocks;
        self.blocks += 1;

        self.open("g", vec![("class", "ink-block".to_string())])?;
        if !block.texture.is_empty() {
            self.open("defs", vec![])?;
            for (i, layer) in block.texture.iter().enumerate() {
                self.open(
                    "pattern",
                    vec![
                        ("id", format!("block{}-layer{}", id, i)),
                        ("patternUnits", "userSpaceOnUse".to_string()),
                        ("width", fmt_num(layer.spacing)),
                        ("height", fmt_num(layer.spacing)),
                        ("patternTransform", format!("rotate({})", fmt_num(layer.rotation_degrees - 90.0))),
                    ],
                )?;
                let mut stripe = vec![
                    ("x", "0".to_string()),
                    ("y", "0".to_string()),
                    ("width", fmt_num(layer.stroke_width)),
                    ("height", fmt_num(layer.spacing)),
                ];
                paint_attrs(&mut stripe, "fill", "fill-opacity", layer.color.with_alpha(layer.opacity));
                self.empty("rect", stripe)?;
                self.close("pattern")?;
            }
            self.close("defs")?;
        }

        let geometry = [
            ("x", fmt_num(block.x)),
            ("y", fmt_num(block.y)),
            ("width", fmt_num(block.width)),
            ("height", fmt_num(block.height)),
        ];
        let mut base = geometry.to_vec();
        paint_attrs(&mut base, "fill", "fill-opacity", block.base_color);
        self.empty("rect", base)?;

        for i in (0..block.texture.len()).rev() {
            let mut layer = geometry.to_vec();
            layer.push(("fill", format!("url(#block{}-layer{})", id, i)));
            self.empty("rect", layer)?;
        }
        self.close("g")
    }

    fn finish(mut self) -> Result<String> {
        self.close("svg")?;
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| VersoError::Render(format!("SVG output is not UTF-8: {}", e)))
    }
}
