//! Drives a [`DocumentPlan`] through the page flow onto a render surface.

use crate::chrome::Canvas;
use crate::config::{ChromeLayout, ReportConfig};
use crate::draw::{self, Context, Flow};
use crate::error::ComposeError;
use crate::plan::{DocumentPlan, Section};
use crate::theme::Theme;
use folio_layout::{PageFlow, Placement, validate_geometry};
use folio_render_core::{ImageData, RenderSurface};
use std::fmt;
use std::time::Instant;

/// Progress of one render. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeState {
    NotStarted,
    ComposingCover,
    /// Index of the section being drawn.
    ComposingBody(usize),
    Finalizing,
    Done,
}

impl fmt::Display for ComposeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeState::NotStarted => write!(f, "NotStarted"),
            ComposeState::ComposingCover => write!(f, "ComposingCover"),
            ComposeState::ComposingBody(i) => write!(f, "ComposingBody({})", i),
            ComposeState::Finalizing => write!(f, "Finalizing"),
            ComposeState::Done => write!(f, "Done"),
        }
    }
}

impl ComposeState {
    fn allows(self, next: ComposeState) -> bool {
        use ComposeState::*;
        match (self, next) {
            (NotStarted, ComposingCover) => true,
            // A plan without a cover goes straight to its sections.
            (NotStarted | ComposingCover, ComposingBody(0)) => true,
            (ComposingBody(i), ComposingBody(j)) => j == i + 1,
            (NotStarted | ComposingCover | ComposingBody(_), Finalizing) => true,
            (Finalizing, Done) => true,
            _ => false,
        }
    }

    /// Moves to `next`, rejecting anything but a forward step.
    pub fn advance(&mut self, next: ComposeState) -> Result<(), ComposeError> {
        if !self.allows(next) {
            return Err(ComposeError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            });
        }
        log::trace!("compose state {} -> {}", self, next);
        *self = next;
        Ok(())
    }
}

/// A finished render: the surface output plus what landed where.
#[derive(Debug)]
pub struct RenderedArtifact<O> {
    pub output: O,
    pub page_count: usize,
    pub placements: Vec<Placement>,
}

/// Renders document plans with one configuration. Holds no per-render state, so a single
/// composer can serve any number of renders.
#[derive(Debug, Clone)]
pub struct Composer {
    config: ReportConfig,
    theme: Theme,
    logo: Option<ImageData>,
}

impl Composer {
    pub fn new(config: ReportConfig) -> Self {
        let theme = Theme::new(config.fonts.clone(), config.palette.clone());
        Self { config, theme, logo: None }
    }

    /// Uses `logo` for cover items that ask for one.
    pub fn with_logo(mut self, logo: ImageData) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn compose<S: RenderSurface>(
        &self,
        plan: &DocumentPlan,
        surface: S,
    ) -> Result<RenderedArtifact<S::Output>, ComposeError> {
        let start = Instant::now();
        let geometry = self.config.geometry(plan.kind);
        validate_geometry(&geometry)?;
        let layout = self.config.layout(plan.kind);
        let ctx = Context::new(&self.theme, &layout, self.logo.as_ref());

        let chrome = ChromeLayout::for_kind(plan.kind);
        let canvas = Canvas::new(surface, self.theme.clone(), plan.chrome.clone(), chrome);
        let mut flow = PageFlow::new(geometry, canvas);
        let mut state = ComposeState::NotStarted;

        if let Some(cover) = &plan.cover {
            state.advance(ComposeState::ComposingCover)?;
            flow.begin_document()?;
            draw::cover(&mut flow, &ctx, cover)?;
        }

        for (index, section) in plan.sections.iter().enumerate() {
            state.advance(ComposeState::ComposingBody(index))?;
            self.section(&mut flow, &ctx, section)?;
        }

        state.advance(ComposeState::Finalizing)?;
        if flow.page_kind().is_none() {
            // An empty plan still yields one page.
            flow.begin_content_page()?;
        }
        let page_count = flow.page_number();
        let (canvas, placements) = flow.finish()?;
        let output = canvas.into_surface().finish()?;
        state.advance(ComposeState::Done)?;

        log::info!(
            "composed '{}': {} pages, {} placements in {:.2?}",
            plan.title,
            page_count,
            placements.len(),
            start.elapsed()
        );
        Ok(RenderedArtifact { output, page_count, placements })
    }

    fn section<S: RenderSurface>(
        &self,
        flow: &mut Flow<S>,
        ctx: &Context,
        section: &Section,
    ) -> Result<(), ComposeError> {
        match section {
            Section::Verdict(card) => draw::verdict(flow, ctx, card),
            Section::Reasons(list) => draw::reasons(flow, ctx, list),
            Section::Table(table) => draw::table_section(flow, ctx, table),
            Section::Narrative(narrative) => draw::narrative(flow, ctx, narrative),
            Section::Summary(summary) => draw::summary(flow, ctx, summary),
            Section::Status(card) => draw::status(flow, ctx, card),
            Section::Disclaimer(disclaimer) => draw::disclaimer(flow, ctx, disclaimer),
            Section::PageBreak => {
                if !flow.is_at_page_top() {
                    flow.begin_content_page()?;
                }
                Ok(())
            }
            Section::Spacing(amount) => {
                if !flow.is_at_page_top() {
                    flow.add_spacing(*amount);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_only_move_forward() {
        let mut state = ComposeState::NotStarted;
        state.advance(ComposeState::ComposingCover).unwrap();
        state.advance(ComposeState::ComposingBody(0)).unwrap();
        state.advance(ComposeState::ComposingBody(1)).unwrap();
        assert!(state.advance(ComposeState::ComposingBody(3)).is_err());
        state.advance(ComposeState::Finalizing).unwrap();
        state.advance(ComposeState::Done).unwrap();
        let err = state.advance(ComposeState::ComposingCover).unwrap_err();
        assert!(err.to_string().contains("from Done to ComposingCover"));
    }

    #[test]
    fn a_plan_without_sections_can_finish_from_the_start() {
        let mut state = ComposeState::NotStarted;
        assert!(state.advance(ComposeState::Done).is_err());
        state.advance(ComposeState::Finalizing).unwrap();
        assert_eq!(state, ComposeState::Finalizing);
    }
}
