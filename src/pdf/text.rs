use crate::fonts::{ASCENDER_RATIO, DESCENDER_RATIO};
use crate::model::Rect;
use crate::style::StyledRun;

use super::surface::{DrawOp, Surface, TextOp};

/// One word fragment in a single span, positioned relative to the frame's
/// left edge (indent included).
pub(crate) struct Chunk {
    pub(crate) span: usize,
    pub(crate) text: String,
    pub(crate) x: f32,
    pub(crate) width: f32,
}

pub(crate) struct TextLine {
    pub(crate) chunks: Vec<Chunk>,
}

enum Token {
    /// Pieces of one unbreakable word; it may cross span boundaries.
    Word(Vec<(usize, String)>),
    Space(f32),
    Newline,
}

fn tokenize(run: &StyledRun) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<(usize, String)> = Vec::new();

    for (idx, span) in run.spans.iter().enumerate() {
        let style = &span.style;
        for ch in span.text.chars() {
            if ch.is_whitespace() {
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                if ch == '\n' {
                    tokens.push(Token::Newline);
                } else {
                    // Tabs and exotic spaces measure as a plain space.
                    tokens.push(Token::Space(style.face.word_width(" ", style.size)));
                }
                continue;
            }
            match word.last_mut() {
                Some((span_idx, text)) if *span_idx == idx => text.push(ch),
                _ => word.push((idx, ch.to_string())),
            }
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

/// Wrap `run` into lines no wider than `max_width`. Breaks only at
/// whitespace; a single word wider than the line overflows it. This is the
/// only line-breaking path: [`height_of`] and [`draw`] both call it.
pub(crate) fn build_lines(run: &StyledRun, max_width: f32) -> Vec<TextLine> {
    let para = &run.paragraph;
    let mut lines: Vec<TextLine> = Vec::new();
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut paragraph_start = true;
    let mut cursor_x = 0.0f32;
    let mut pending_space = 0.0f32;

    let indent = |paragraph_start: bool| {
        if paragraph_start {
            para.first_line_indent
        } else {
            para.head_indent
        }
    };

    for token in tokenize(run) {
        match token {
            Token::Space(w) => {
                if !chunks.is_empty() {
                    pending_space += w;
                }
            }
            Token::Newline => {
                lines.push(TextLine {
                    chunks: std::mem::take(&mut chunks),
                });
                paragraph_start = true;
                cursor_x = 0.0;
                pending_space = 0.0;
            }
            Token::Word(pieces) => {
                let measured: Vec<(usize, String, f32)> = pieces
                    .into_iter()
                    .map(|(span, text)| {
                        let style = &run.spans[span].style;
                        let w = style.face.word_width(&text, style.size);
                        (span, text, w)
                    })
                    .collect();
                let word_w: f32 = measured.iter().map(|(_, _, w)| w).sum();

                let mut start = if chunks.is_empty() {
                    0.0
                } else {
                    cursor_x + pending_space
                };
                let available = max_width - indent(paragraph_start);
                if !chunks.is_empty() && start + word_w > available {
                    lines.push(TextLine {
                        chunks: std::mem::take(&mut chunks),
                    });
                    paragraph_start = false;
                    start = 0.0;
                }

                let line_indent = indent(paragraph_start);
                let mut offset = start;
                for (span, text, width) in measured {
                    chunks.push(Chunk {
                        span,
                        text,
                        x: line_indent + offset,
                        width,
                    });
                    offset += width;
                }
                cursor_x = start + word_w;
                pending_space = 0.0;
            }
        }
    }
    if !chunks.is_empty() {
        lines.push(TextLine { chunks });
    }
    while lines.last().is_some_and(|l| l.chunks.is_empty()) {
        lines.pop();
    }
    lines
}

/// Height `run` occupies when wrapped to `max_width`, rounded up to a whole
/// unit. Zero when the run has no visible text.
pub(crate) fn height_of(run: &StyledRun, max_width: f32) -> f32 {
    if !run.has_visible_text() {
        return 0.0;
    }
    let lines = build_lines(run, max_width).len();
    stacked_height(run, lines)
}

fn stacked_height(run: &StyledRun, lines: usize) -> f32 {
    let p = &run.paragraph;
    (p.space_before + lines as f32 * run.line_height() + p.space_after).ceil()
}

/// Where a run is drawn, in layout space (top-left origin).
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextFrame {
    pub(crate) x: f32,
    pub(crate) top: f32,
    pub(crate) width: f32,
    /// Lines starting at or below this y are not emitted.
    pub(crate) bottom: f32,
}

impl TextFrame {
    pub(crate) fn flowing(x: f32, top: f32, width: f32) -> Self {
        TextFrame {
            x,
            top,
            width,
            bottom: f32::INFINITY,
        }
    }

    pub(crate) fn boxed(frame: Rect) -> Self {
        TextFrame {
            x: frame.x,
            top: frame.y,
            width: frame.width,
            bottom: frame.max_y(),
        }
    }
}

/// Draw `run` into the current page of `surface` and register a link
/// annotation for every span that carries a target. Returns the height
/// consumed, identical to [`height_of`] for the same width.
pub(crate) fn draw(surface: &mut Surface, run: &StyledRun, frame: TextFrame) -> f32 {
    if !run.has_visible_text() {
        return 0.0;
    }
    let space = surface.space();
    let lines = build_lines(run, frame.width);
    let line_h = run.line_height();
    let font_size = run.max_font_size();
    // Centre the glyph box (ascender + descender) in the line box.
    let baseline_offset = (line_h + font_size * (ASCENDER_RATIO - DESCENDER_RATIO)) / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let line_top = frame.top + run.paragraph.space_before + i as f32 * line_h;
        if line_top >= frame.bottom {
            break;
        }
        let baseline = space.flip_y(line_top + baseline_offset, 0.0);

        for chunk in &line.chunks {
            let style = &run.spans[chunk.span].style;
            surface.push(DrawOp::Text(TextOp {
                x: frame.x + chunk.x,
                y: baseline,
                face: style.face,
                size: style.size,
                color: style.color,
                text: chunk.text.clone(),
            }));
        }

        let mut idx = 0;
        while idx < line.chunks.len() {
            let first = &line.chunks[idx];
            let mut last = first;
            while let Some(next) = line.chunks.get(idx + 1)
                && next.span == first.span
            {
                last = next;
                idx += 1;
            }
            idx += 1;
            if let Some(url) = &run.spans[first.span].link {
                let hit = Rect::new(frame.x + first.x, line_top, last.x + last.width - first.x, line_h);
                surface.add_link(space.flip_rect(hit), url.clone());
            }
        }
    }
    stacked_height(run, lines.len())
}
