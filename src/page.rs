//! The page: selector stage, drawing surface and response area.
//!
//! The page moves once from [`PageState::SelectingCountry`] to
//! [`PageState::Drawing`] and never goes back. Everything the host would
//! deliver as an event is a method here.

use crate::async_api::{SubmissionDispatcher, SubmissionId};
use crate::drawing::{DrawingSurface, PaletteColor};
use crate::inference::{InferenceClient, InferenceOutcome};
use crate::{Error, PageConfig, Result};
use log::{error, info};
use maud::{html, Markup, DOCTYPE};

pub const SELECT_HEADING: &str = "Select your country";
pub const DRAW_HEADING: &str = "Draw the flag of your country";
pub const RESPONSE_HEADING: &str = "AI Response:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    SelectingCountry,
    Drawing,
}

impl PageState {
    /// Returns `true` if this call performed the transition.
    pub fn activate(&mut self) -> bool {
        match self {
            PageState::SelectingCountry => {
                *self = PageState::Drawing;
                true
            }
            PageState::Drawing => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub disabled: bool,
    pub selected: bool,
}

/// The country dropdown. Its value is never read; it only exists to be
/// intercepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub options: Vec<SelectOption>,
    pub visible: bool,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            options: vec![
                SelectOption {
                    value: String::new(),
                    text: "Select Country".to_string(),
                    disabled: true,
                    selected: true,
                },
                SelectOption {
                    value: "dummy".to_string(),
                    text: "Dummy Option".to_string(),
                    disabled: false,
                    selected: false,
                },
            ],
            visible: true,
        }
    }
}

/// A user-facing affordance currently on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Heading(String),
    Select(Selector),
    Canvas { width: u32, height: u32 },
    ColorButton(PaletteColor),
    BrushSlider { min: u32, max: u32, value: u32 },
    SubmitButton,
    ClearButton,
    ResponseHeading,
    ResponseText(String),
}

pub struct Page {
    config: PageConfig,
    state: PageState,
    heading: String,
    selector: Selector,
    surface: Option<DrawingSurface>,
    response: String,
}

impl Page {
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            state: PageState::default(),
            heading: SELECT_HEADING.to_string(),
            selector: Selector::default(),
            surface: None,
            response: String::new(),
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Current contents of the response paragraph.
    pub fn response_text(&self) -> &str {
        &self.response
    }

    /// The selector's open gesture. The dropdown never opens; instead the
    /// page switches to drawing mode. Once the selector is hidden this is a
    /// no-op and returns `false`.
    pub fn activate_selector(&mut self) -> bool {
        if !self.selector.visible || !self.state.activate() {
            return false;
        }
        self.heading = DRAW_HEADING.to_string();
        self.selector.visible = false;
        self.surface = Some(DrawingSurface::new(self.config.canvas));
        info!(
            "drawing surface ready ({}x{})",
            self.config.canvas.width, self.config.canvas.height
        );
        true
    }

    pub fn surface(&self) -> Result<&DrawingSurface> {
        self.surface.as_ref().ok_or(Error::NotDrawing)
    }

    pub fn surface_mut(&mut self) -> Result<&mut DrawingSurface> {
        self.surface.as_mut().ok_or(Error::NotDrawing)
    }

    /// Put an outcome on the page: answers replace the response text,
    /// failures are logged and leave it untouched. Returns whether the
    /// response text changed.
    pub fn apply_outcome(&mut self, outcome: &InferenceOutcome) -> bool {
        match outcome {
            InferenceOutcome::Answer(text) => {
                self.response = text.clone();
                true
            }
            InferenceOutcome::Failed(reason) => {
                error!("Error: {}", reason);
                false
            }
        }
    }

    /// Submit the current drawing and wait for the outcome, which is also
    /// applied to the page.
    pub fn submit(&mut self, client: &InferenceClient) -> Result<InferenceOutcome> {
        let payload = self.surface()?.encode_payload()?;
        let outcome = client.infer(&payload);
        self.apply_outcome(&outcome);
        Ok(outcome)
    }

    /// Submit without waiting. Collect the result later with
    /// [`Page::pump_completions`] or [`Page::wait_for_completion`].
    pub fn dispatch_submission(
        &mut self,
        dispatcher: &mut SubmissionDispatcher,
    ) -> Result<SubmissionId> {
        let payload = self.surface()?.encode_payload()?;
        Ok(dispatcher.dispatch(payload))
    }

    /// Apply every completion that is already available, in arrival order.
    pub fn pump_completions(&mut self, dispatcher: &mut SubmissionDispatcher) -> usize {
        let mut applied = 0;
        while let Some(done) = dispatcher.try_next() {
            self.apply_outcome(&done.outcome);
            applied += 1;
        }
        applied
    }

    /// Block for the next completion and apply it.
    pub fn wait_for_completion(
        &mut self,
        dispatcher: &mut SubmissionDispatcher,
    ) -> Option<SubmissionId> {
        let done = dispatcher.wait_next()?;
        self.apply_outcome(&done.outcome);
        Some(done.id)
    }

    /// Affordances currently shown, top to bottom.
    pub fn controls(&self) -> Vec<Control> {
        let mut out = vec![Control::Heading(self.heading.clone())];
        if self.selector.visible {
            out.push(Control::Select(self.selector.clone()));
        }
        if let Some(surface) = &self.surface {
            let raster = surface.raster();
            out.push(Control::Canvas {
                width: raster.width(),
                height: raster.height(),
            });
            out.extend(PaletteColor::ALL.iter().copied().map(Control::ColorButton));
            out.push(Control::BrushSlider {
                min: crate::drawing::BrushWidth::MIN,
                max: crate::drawing::BrushWidth::MAX,
                value: surface.brush().width.get(),
            });
            out.push(Control::SubmitButton);
            out.push(Control::ClearButton);
            out.push(Control::ResponseHeading);
            out.push(Control::ResponseText(self.response.clone()));
        }
        out
    }

    /// Static HTML snapshot of the page as it currently stands.
    pub fn to_html(&self) -> String {
        html! {
            (DOCTYPE)
            html {
                head {
                    style { (STYLE) }
                }
                body {
                    @for control in self.controls() {
                        (render_control(&control))
                    }
                }
            }
        }
        .into_string()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}

const STYLE: &str = "
    #canvas {
        border: 1px solid black;
        cursor: crosshair;
    }
    .color-picker {
        margin: 5px;
    }
";

fn render_control(control: &Control) -> Markup {
    match control {
        Control::Heading(text) => html! { h1 { (text) } },
        Control::Select(sel) => html! {
            select #countrySelect {
                @for o in &sel.options {
                    option value=(o.value) disabled[o.disabled] selected[o.selected] { (o.text) }
                }
            }
        },
        Control::Canvas { width, height } => html! {
            canvas #canvas width=(width) height=(height) {}
            br;
        },
        Control::ColorButton(c) => html! {
            button.color-picker data-color=(c.name()) style={ "background-color: " (c.name()) } {
                (c.label())
            }
        },
        Control::BrushSlider { min, max, value } => html! {
            br; br;
            label for="lineWidth" { "Brush Size:" }
            input #lineWidth type="range" name="lineWidth" min=(min) max=(max) value=(value);
            br; br;
        },
        Control::SubmitButton => html! { button #submitBtn { "Submit Drawing" } },
        Control::ClearButton => html! { button #clearBtn { "Clear Canvas" } },
        Control::ResponseHeading => html! { h2 { (RESPONSE_HEADING) } },
        Control::ResponseText(text) => html! { p #responseText { (text) } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_state_transitions_once() {
        let mut s = PageState::default();
        assert!(s.activate());
        assert_eq!(s, PageState::Drawing);
        assert!(!s.activate());
        assert_eq!(s, PageState::Drawing);
    }

    #[test]
    fn selector_has_placeholder_and_filler() {
        let sel = Selector::default();
        assert!(sel.options[0].disabled && sel.options[0].selected);
        assert_eq!(sel.options[0].value, "");
        assert!(!sel.options[1].disabled);
    }

    #[test]
    fn activation_builds_surface_once() {
        let mut page = Page::default();
        assert!(matches!(page.surface(), Err(Error::NotDrawing)));
        assert_eq!(page.heading(), SELECT_HEADING);

        assert!(page.activate_selector());
        assert_eq!(page.state(), PageState::Drawing);
        assert_eq!(page.heading(), DRAW_HEADING);
        assert!(!page.selector().visible);

        page.surface_mut().unwrap().select_color(PaletteColor::Red);
        assert!(!page.activate_selector());
        // a second activation must not rebuild the surface
        assert_eq!(page.surface().unwrap().brush().color, PaletteColor::Red);
    }

    #[test]
    fn controls_before_and_after_activation() {
        let mut page = Page::default();
        let before = page.controls();
        assert_eq!(before.len(), 2);
        assert!(matches!(before[1], Control::Select(_)));

        page.activate_selector();
        let after = page.controls();
        let buttons = after
            .iter()
            .filter(|c| matches!(c, Control::ColorButton(_)))
            .count();
        assert_eq!(buttons, 7);
        assert!(!after.iter().any(|c| matches!(c, Control::Select(_))));
        assert!(after.contains(&Control::Canvas {
            width: 500,
            height: 300
        }));
        assert!(after.contains(&Control::BrushSlider {
            min: 1,
            max: 20,
            value: 5
        }));
    }

    #[test]
    fn failures_leave_response_untouched() {
        let mut page = Page::default();
        assert!(page.apply_outcome(&InferenceOutcome::Answer("Peru".into())));
        assert!(!page.apply_outcome(&InferenceOutcome::Failed("boom".into())));
        assert_eq!(page.response_text(), "Peru");
        assert!(page.apply_outcome(&InferenceOutcome::Answer("Chile".into())));
        assert_eq!(page.response_text(), "Chile");
    }

    #[test]
    fn html_snapshot_escapes_response() {
        let mut page = Page::default();
        assert!(page.to_html().contains("<select id=\"countrySelect\">"));
        page.activate_selector();
        page.apply_outcome(&InferenceOutcome::Answer("<b>Chad</b>".into()));
        let html = page.to_html();
        assert!(html.contains("<h1>Draw the flag of your country</h1>"));
        assert!(html.contains("data-color=\"orange\""));
        assert!(html.contains("&lt;b&gt;Chad&lt;/b&gt;"));
        assert!(!html.contains("<b>Chad"));
        assert!(!html.contains("countrySelect"));
    }

    #[test]
    fn html_snapshot_lists_selector_options() {
        let html = Page::default().to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Select your country</h1>"));
        assert!(html.contains("disabled"));
        assert!(html.contains(">Select Country</option>"));
        assert!(html.contains("value=\"dummy\""));
        assert!(!html.contains("<canvas"));
    }

    #[test]
    fn html_snapshot_escapes_quotes_in_text() {
        let mut page = Page::default();
        page.activate_selector();
        page.apply_outcome(&InferenceOutcome::Answer("\"Côte\" & co".into()));
        let html = page.to_html();
        assert!(html.contains("&quot;Côte&quot; &amp; co"));
        assert!(html.contains("id=\"lineWidth\""));
        assert!(html.contains("width=\"500\""));
    }

    #[test]
    fn submit_requires_drawing_mode() {
        struct Never;
        impl crate::inference::Transport for Never {
            fn post(
                &self,
                _r: &crate::inference::HttpRequest,
            ) -> Result<crate::inference::HttpResponse> {
                unreachable!("no request expected")
            }
        }
        let client = InferenceClient::with_transport(PageConfig::default(), Never);
        let mut page = Page::default();
        assert!(matches!(page.submit(&client), Err(Error::NotDrawing)));
    }
}
