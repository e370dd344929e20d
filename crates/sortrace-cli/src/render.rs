use std::io::{self, Write};

use sortrace_playback::{Frame, FrameSink, SinkError};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Draws each frame as horizontal text bars, one line per element.
pub struct TextBars<W> {
    out: W,
    width: usize,
    clear: bool,
}

impl TextBars<io::Stdout> {
    /// Full-screen renderer that repaints the terminal on every frame.
    pub fn stdout(width: usize) -> Self {
        Self {
            out: io::stdout(),
            width,
            clear: true,
        }
    }
}

impl<W: Write> TextBars<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            clear: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let mut text = String::new();
        if self.clear {
            text.push_str(CLEAR_SCREEN);
        }
        text.push_str(&frame.title);
        text.push('\n');

        for bar in &frame.bars {
            let len = if frame.y_max > 0.0 {
                (bar.value.max(0) as f64 / frame.y_max * self.width as f64).round() as usize
            } else {
                0
            };
            let fill = if bar.highlighted { "#" } else { "=" };
            if frame.show_labels {
                text.push_str(&format!("{:>5} |", bar.value));
            } else {
                text.push('|');
            }
            text.push_str(&fill.repeat(len));
            if bar.highlighted {
                text.push_str(" <");
            }
            text.push('\n');
        }

        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write + Send> FrameSink for TextBars<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.draw(frame)
            .map_err(|err| SinkError::new(format!("terminal write failed: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortrace_core::{AlgorithmId, Step, StepKind};

    fn frame(label_threshold: usize) -> Frame {
        let step = Step {
            snapshot: vec![10, 5, 0],
            highlighted: vec![1],
            comparisons: 2,
            swaps: 1,
            kind: StepKind::Compare,
        };
        Frame::from_step(AlgorithmId::Selection, &step, label_threshold)
    }

    #[test]
    fn test_draws_title_and_scaled_bars() {
        let mut bars = TextBars::new(Vec::new(), 11);
        bars.render(&frame(50)).unwrap();
        let text = String::from_utf8(bars.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Selection Sort - Comparisons: 2, Swaps: 1");
        assert_eq!(lines[1], "   10 |==========");
        assert_eq!(lines[2], "    5 |##### <");
        assert_eq!(lines[3], "    0 |");
    }

    #[test]
    fn test_omits_labels_for_long_sequences() {
        let mut bars = TextBars::new(Vec::new(), 11);
        bars.render(&frame(2)).unwrap();
        let text = String::from_utf8(bars.into_inner()).unwrap();
        assert_eq!(text.lines().nth(1), Some("|=========="));
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_becomes_sink_error() {
        let mut bars = TextBars::new(Closed, 10);
        let err = bars.render(&frame(50)).unwrap_err();
        assert!(err.to_string().starts_with("terminal write failed"));
    }
}
