//! Text HUD: the flight timer and the diagnostics list, both shown in the window title.

/// Seconds between timer text refreshes.
pub const TIMER_REFRESH_SECONDS: f32 = 0.25;

/// Format seconds as `mm:ss`. Minutes keep counting past 99.
pub fn format_mm_ss(seconds: f32) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Elapsed-time readout, refreshed on its own cadence rather than every frame.
#[derive(Debug, Clone)]
pub struct TimerDisplay {
    text: String,
    last_refresh: Option<f32>,
    interval: f32,
}

impl Default for TimerDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerDisplay {
    pub fn new() -> Self {
        Self {
            text: format_mm_ss(0.0),
            last_refresh: None,
            interval: TIMER_REFRESH_SECONDS,
        }
    }

    /// Returns true when the text was refreshed.
    pub fn update(&mut self, elapsed_seconds: f32) -> bool {
        if let Some(last) = self.last_refresh {
            if elapsed_seconds - last < self.interval {
                return false;
            }
        }
        self.last_refresh = Some(elapsed_seconds);
        self.text = format_mm_ss(elapsed_seconds);
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Human-readable problems worth showing to the player (missing assets and such).
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    const MAX_MESSAGES: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{}", text);
        self.messages.push(text);
        if self.messages.len() > Self::MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Window title: name, timer, frame rate, then the newest diagnostic if any.
pub fn window_title(timer: &TimerDisplay, fps: f32, diagnostics: &Diagnostics) -> String {
    let mut title = format!("Skyhop  {}  {:.0} fps", timer.text(), fps);
    if let Some(last) = diagnostics.messages().last() {
        title.push_str("  | ");
        title.push_str(last);
        if diagnostics.messages().len() > 1 {
            title.push_str(&format!(" (+{} more)", diagnostics.messages().len() - 1));
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(0.0), "00:00");
        assert_eq!(format_mm_ss(59.9), "00:59");
        assert_eq!(format_mm_ss(61.0), "01:01");
        assert_eq!(format_mm_ss(6000.0), "100:00");
        assert_eq!(format_mm_ss(-3.0), "00:00");
        assert_eq!(format_mm_ss(f32::NAN), "00:00");
    }

    #[test]
    fn timer_refreshes_at_most_every_quarter_second() {
        let mut timer = TimerDisplay::new();
        assert!(timer.update(0.0));
        assert!(!timer.update(0.1));
        assert!(!timer.update(0.24));
        assert!(timer.update(0.25));
        assert!(!timer.update(0.3));
        assert!(timer.update(61.2));
        assert_eq!(timer.text(), "01:01");
    }

    #[test]
    fn diagnostics_keep_newest() {
        let mut diag = Diagnostics::new();
        for i in 0..12 {
            diag.push(format!("problem {}", i));
        }
        assert_eq!(diag.messages().len(), Diagnostics::MAX_MESSAGES);
        assert_eq!(diag.messages().last().map(String::as_str), Some("problem 11"));
        assert_eq!(diag.messages()[0], "problem 4");
    }

    #[test]
    fn title_mentions_latest_problem() {
        let mut timer = TimerDisplay::new();
        timer.update(75.0);
        let mut diag = Diagnostics::new();
        assert_eq!(window_title(&timer, 60.0, &diag), "Skyhop  01:15  60 fps");
        diag.push("a");
        diag.push("b");
        assert_eq!(window_title(&timer, 60.0, &diag), "Skyhop  01:15  60 fps  | b (+1 more)");
    }
}
