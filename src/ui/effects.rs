//! Decorative page effects, reduced to their geometry and timing.

use std::time::Duration;

/// Interval between animation frames.
pub const FRAME: Duration = Duration::from_millis(16);

/// Elements past this much scrolling show the back-to-top button.
pub const BACK_TO_TOP_AFTER: f64 = 300.0;

/// Share of an element that must be on screen before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Margin applied to the viewport when deciding to reveal an element.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Lifetime of a click ripple.
pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(600);

/// Delay before a progress bar starts growing to its width.
pub const PROGRESS_DELAY: Duration = Duration::from_millis(200);

/// Gap between a tooltip and the element it belongs to, in pixels.
pub const TOOLTIP_GAP: f64 = 10.0;

/// Delay before a new tooltip fades in.
pub const TOOLTIP_SHOW_DELAY: Duration = Duration::from_millis(10);

/// Delay between hiding a tooltip and removing it.
pub const TOOLTIP_REMOVE_DELAY: Duration = Duration::from_millis(300);

/// A counter that ramps from zero up to a target.
///
/// # Example
///
/// ```
/// # use moviereviews::ui::effects::Counter;
/// # use std::time::Duration;
/// let counter = Counter::new(100).with_duration(Duration::from_millis(64));
///
/// assert_eq!(vec![25, 50, 75, 100], counter.frames().collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    target: u32,
    duration: Duration,
}

impl Counter {
    /// The ramp duration used when none is given.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

    /// Creates a counter ramping to `target` over [`DEFAULT_DURATION`](Self::DEFAULT_DURATION).
    #[must_use]
    pub fn new(target: u32) -> Self {
        Self {
            target,
            duration: Self::DEFAULT_DURATION,
        }
    }

    /// Sets how long the ramp takes.
    #[must_use]
    pub fn with_duration(self, duration: Duration) -> Self {
        Self { duration, ..self }
    }

    /// Returns the value shown at each frame, one per [`FRAME`].
    ///
    /// Values never decrease and the last one is exactly the target.
    pub fn frames(&self) -> impl Iterator<Item = u32> + use<> {
        let target = u128::from(self.target);
        let duration = self.duration.as_millis();
        let frame = FRAME.as_millis();

        let mut tick: u128 = 0;
        let mut done = false;

        std::iter::from_fn(move || {
            if done {
                return None;
            }

            tick += 1;

            // Running value after `tick` steps of `target / (duration / frame)`.
            let current = if duration == 0 {
                target
            } else {
                tick * target * frame / duration
            };

            if current >= target {
                done = true;
                return u32::try_from(target).ok();
            }

            u32::try_from(current).ok()
        })
    }

    /// Plays the ramp in real time, handing each value to `show`.
    pub async fn animate(self, mut show: impl FnMut(u32)) {
        let mut interval = tokio::time::interval(FRAME);
        // The first tick of an interval completes immediately.
        interval.tick().await;

        for value in self.frames() {
            interval.tick().await;
            show(value);
        }
    }
}

/// Text revealed one character at a time, followed by a blinking caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    speed: Duration,
}

impl Typewriter {
    /// Time per character used when none is given.
    pub const DEFAULT_SPEED: Duration = Duration::from_millis(100);

    /// How long the caret stays after the last character.
    pub const CARET_HOLD: Duration = Duration::from_millis(1000);

    /// Creates a typewriter for `text` at [`DEFAULT_SPEED`](Self::DEFAULT_SPEED).
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            speed: Self::DEFAULT_SPEED,
        }
    }

    /// Sets the time per character.
    #[must_use]
    pub fn with_speed(self, speed: Duration) -> Self {
        Self { speed, ..self }
    }

    /// Returns the text shown after each character is typed.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.text
            .char_indices()
            .map(|(idx, ch)| idx + ch.len_utf8())
            .filter_map(|end| self.text.get(..end))
    }

    /// Returns when the caret goes away, measured from the start.
    #[must_use]
    pub fn caret_removed_after(&self) -> Duration {
        let chars = u32::try_from(self.text.chars().count()).unwrap_or(u32::MAX);
        self.speed.saturating_mul(chars) + Self::CARET_HOLD
    }

    /// Plays the effect in real time. `show` gets the visible text and whether
    /// the caret is showing.
    pub async fn animate(&self, mut show: impl FnMut(&str, bool)) {
        show("", true);

        for prefix in self.prefixes() {
            tokio::time::sleep(self.speed).await;
            show(prefix, true);
        }

        tokio::time::sleep(Self::CARET_HOLD).await;
        show(&self.text, false);
    }
}

/// Returns the vertical offset of a parallax element, in pixels.
///
/// `speed` comes from the element's `data-speed`; without one it moves at half
/// the scroll speed.
#[must_use]
pub fn parallax_offset(scroll_top: f64, speed: Option<f64>) -> f64 {
    -(scroll_top * speed.unwrap_or(0.5))
}

/// Returns the CSS `transform` of a parallax element.
#[must_use]
pub fn parallax_transform(scroll_top: f64, speed: Option<f64>) -> String {
    format!("translateY({}px)", parallax_offset(scroll_top, speed))
}

/// Returns the id an in-page link scrolls to, e.g. `"reviews"` for `"#reviews"`.
///
/// A bare `#` and anything that is not a plain `#id` resolve to nothing, so
/// the link keeps its default behaviour.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#')
        .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
}

/// Returns the scroll position that puts the top of `target` at the top of
/// the viewport, given the current `scroll_top`.
#[must_use]
pub fn anchor_scroll_top(scroll_top: f64, target: Rect) -> f64 {
    (scroll_top + target.top).max(0.0)
}

/// Returns `true` if the back-to-top button should show.
#[inline]
#[must_use]
pub fn back_to_top_visible(scroll_top: f64) -> bool {
    scroll_top > BACK_TO_TOP_AFTER
}

/// Returns the class added to an element animated on scroll.
#[must_use]
pub fn animation_class(animation: Option<&str>) -> String {
    format!("animate-{}", animation.unwrap_or("fadeInUp"))
}

/// Returns the source to load for a lazy image. A non-empty `data-src` wins.
#[must_use]
pub fn lazy_image_src<'a>(data_src: Option<&'a str>, src: &'a str) -> &'a str {
    data_src.filter(|data_src| !data_src.is_empty()).unwrap_or(src)
}

/// Returns the width a progress bar grows to after [`PROGRESS_DELAY`].
#[must_use]
pub fn progress_width(data_width: Option<&str>) -> &str {
    data_width.unwrap_or("0%")
}

/// A box in viewport coordinates, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Distance from the left edge.
    pub left: f64,
    /// Distance from the top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// A click ripple: a circle centred on the click, big enough to cover the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Width and height of the ripple.
    pub size: f64,
    /// Left of the ripple, relative to the button.
    pub x: f64,
    /// Top of the ripple, relative to the button.
    pub y: f64,
}

impl Ripple {
    /// Returns the ripple for a click at (`client_x`, `client_y`) on `button`.
    #[must_use]
    pub fn at(button: Rect, client_x: f64, client_y: f64) -> Self {
        let size = button.width.max(button.height);

        Self {
            size,
            x: client_x - button.left - size / 2.0,
            y: client_y - button.top - size / 2.0,
        }
    }
}

/// Returns the (left, top) of a tooltip of `width` × `height`, centred above `anchor`.
#[must_use]
pub fn tooltip_position(anchor: Rect, width: f64, height: f64) -> (f64, f64) {
    let left = anchor.left + anchor.width / 2.0 - width / 2.0;
    let top = anchor.top - height - TOOLTIP_GAP;
    (left, top)
}
