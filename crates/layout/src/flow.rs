//! Cursor-driven page flow: decides where pages break and records where blocks landed.

use folio_types::PageGeometry;

const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum PageKind {
    /// A free-form page that receives only cover decoration.
    Cover,
    /// A body page with running header, footer and background chrome.
    Content,
}

/// What kind of block a [`Placement`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum PlacementKind {
    Cover,
    Heading,
    Paragraph,
    ListItem,
    TableRow,
    Divider,
    Card,
    Chart,
    Note,
}

/// Vertical extent of one drawn block.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Placement {
    pub page: usize,
    pub page_kind: PageKind,
    pub kind: PlacementKind,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    /// 1-based; 0 until the first page opens.
    pub page_number: usize,
    pub y: f32,
}

/// Identifies the page a [`PageChrome`] callback is painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageInfo {
    pub number: usize,
    pub kind: PageKind,
    pub geometry: PageGeometry,
}

/// Paints the per-page boilerplate. Called by [`PageFlow`] whenever a page opens or closes.
pub trait PageChrome {
    type Error;

    fn begin_page(&mut self, page: &PageInfo) -> Result<(), Self::Error>;
    fn end_page(&mut self, page: &PageInfo) -> Result<(), Self::Error>;
}

/// The result of checking whether a block fits under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

pub fn check_fit(cursor_y: f32, height: f32, content_bottom: f32) -> BreakAnalysis {
    let available = (content_bottom - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: height > available + EPSILON,
        remaining_height: available,
    }
}

/// Space a heading must reserve so it is never stranded at the bottom of a page.
///
/// The heading keeps at least the first line (or row) of the following block, and up to
/// `allowance` of it when the block is taller than that.
pub fn keep_with_next(
    heading_height: f32,
    next_first_unit: f32,
    next_height: f32,
    allowance: f32,
) -> f32 {
    heading_height + next_first_unit.max(next_height.min(allowance))
}

/// Owns the cursor for one render and drives page transitions through a [`PageChrome`].
pub struct PageFlow<C: PageChrome> {
    geometry: PageGeometry,
    chrome: C,
    cursor: Cursor,
    current: Option<PageKind>,
    placements: Vec<Placement>,
}

impl<C: PageChrome> PageFlow<C> {
    pub fn new(geometry: PageGeometry, chrome: C) -> Self {
        Self {
            geometry,
            chrome,
            cursor: Cursor::default(),
            current: None,
            placements: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn y(&self) -> f32 {
        self.cursor.y
    }

    pub fn page_number(&self) -> usize {
        self.cursor.page_number
    }

    pub fn page_kind(&self) -> Option<PageKind> {
        self.current
    }

    pub fn chrome(&mut self) -> &mut C {
        &mut self.chrome
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Height left between the cursor and the bottom of the content area.
    pub fn remaining(&self) -> f32 {
        (self.geometry.content_bottom - self.cursor.y).max(0.0)
    }

    pub fn is_at_page_top(&self) -> bool {
        self.current == Some(PageKind::Content)
            && (self.cursor.y - self.geometry.content_top).abs() < EPSILON
    }

    /// Opens the first page of the document as a cover page.
    pub fn begin_document(&mut self) -> Result<(), C::Error> {
        if self.current.is_some() {
            log::warn!("begin_document called on an open document; starting a new cover page");
        }
        self.open(PageKind::Cover)
    }

    /// Starts a fresh cover page regardless of the remaining space.
    pub fn begin_cover_page(&mut self) -> Result<(), C::Error> {
        self.open(PageKind::Cover)
    }

    /// Starts a fresh content page and puts the cursor at the top of its content area.
    pub fn begin_content_page(&mut self) -> Result<(), C::Error> {
        self.open(PageKind::Content)
    }

    /// Ensures `height` fits below the cursor, starting a new content page if it does not.
    ///
    /// Returns `true` when a page break happened. At most one break is taken per call: a
    /// block taller than a whole content area breaks once and is then placed at the top of
    /// the fresh page.
    pub fn reserve_space(&mut self, height: f32) -> Result<bool, C::Error> {
        if self.current != Some(PageKind::Content) {
            self.begin_content_page()?;
            return Ok(true);
        }

        let analysis = check_fit(self.cursor.y, height, self.geometry.content_bottom);
        if !analysis.should_break {
            return Ok(false);
        }
        if self.is_at_page_top() {
            log::warn!(
                "block of height {:.2} exceeds the page content height of {:.2}; placing it anyway",
                height,
                self.geometry.content_height()
            );
            return Ok(false);
        }

        log::debug!(
            "page break on page {}: need {:.1}, {:.1} remaining",
            self.cursor.page_number,
            height,
            analysis.remaining_height
        );
        self.begin_content_page()?;
        Ok(true)
    }

    /// Advances the cursor without drawing anything.
    pub fn add_spacing(&mut self, amount: f32) {
        if amount > 0.0 {
            self.cursor.y += amount;
        }
    }

    /// Records a block drawn at the cursor and advances past it. Returns the block's top.
    pub fn place(&mut self, kind: PlacementKind, height: f32) -> f32 {
        let top = self.cursor.y;
        self.record(kind, top, height);
        self.cursor.y += height;
        top
    }

    /// Records a block drawn at an absolute position without moving the cursor.
    pub fn record(&mut self, kind: PlacementKind, top: f32, height: f32) {
        let placement = Placement {
            page: self.cursor.page_number,
            page_kind: self.current.unwrap_or(PageKind::Content),
            kind,
            top,
            bottom: top + height,
        };
        log::trace!("placed {:?}", placement);
        self.placements.push(placement);
    }

    /// Closes the last page and hands back the chrome and the placement trace.
    pub fn finish(mut self) -> Result<(C, Vec<Placement>), C::Error> {
        self.close()?;
        Ok((self.chrome, self.placements))
    }

    fn open(&mut self, kind: PageKind) -> Result<(), C::Error> {
        self.close()?;
        self.cursor.page_number += 1;
        self.cursor.y = match kind {
            PageKind::Cover => 0.0,
            PageKind::Content => self.geometry.content_top,
        };
        self.current = Some(kind);
        let info = self.info(kind);
        self.chrome.begin_page(&info)
    }

    fn close(&mut self) -> Result<(), C::Error> {
        if let Some(kind) = self.current.take() {
            let info = self.info(kind);
            self.chrome.end_page(&info)?;
        }
        Ok(())
    }

    fn info(&self, kind: PageKind) -> PageInfo {
        PageInfo {
            number: self.cursor.page_number,
            kind,
            geometry: self.geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Default)]
    struct CountingChrome {
        opened: Vec<(usize, PageKind)>,
        closed: Vec<usize>,
    }

    impl PageChrome for CountingChrome {
        type Error = Infallible;

        fn begin_page(&mut self, page: &PageInfo) -> Result<(), Infallible> {
            self.opened.push((page.number, page.kind));
            Ok(())
        }

        fn end_page(&mut self, page: &PageInfo) -> Result<(), Infallible> {
            self.closed.push(page.number);
            Ok(())
        }
    }

    fn flow() -> PageFlow<CountingChrome> {
        PageFlow::new(PageGeometry::new(612.0, 792.0, 54.0, 72.0, 746.0), CountingChrome::default())
    }

    #[test]
    fn cover_then_content_pages() {
        let mut flow = flow();
        flow.begin_document().unwrap();
        assert_eq!(flow.page_kind(), Some(PageKind::Cover));
        assert!(flow.reserve_space(20.0).unwrap());
        assert_eq!(flow.page_number(), 2);
        assert!(flow.is_at_page_top());

        let (chrome, _) = flow.finish().unwrap();
        assert_eq!(chrome.opened, vec![(1, PageKind::Cover), (2, PageKind::Content)]);
        assert_eq!(chrome.closed, vec![1, 2]);
    }

    #[test]
    fn reserve_breaks_only_when_needed() {
        let mut flow = flow();
        flow.begin_content_page().unwrap();
        flow.place(PlacementKind::Paragraph, 600.0);
        assert!(!flow.reserve_space(74.0).unwrap());
        assert!(flow.reserve_space(74.5).unwrap());
        assert_eq!(flow.page_number(), 2);
        assert_eq!(flow.y(), 72.0);
    }

    #[test]
    fn oversized_reservation_breaks_once_and_never_loops() {
        let mut flow = flow();
        flow.begin_content_page().unwrap();
        flow.place(PlacementKind::Paragraph, 10.0);
        assert!(flow.reserve_space(5000.0).unwrap());
        assert_eq!(flow.page_number(), 2);
        // Already at the top of a fresh page: no further break.
        assert!(!flow.reserve_space(5000.0).unwrap());
        assert_eq!(flow.page_number(), 2);
    }

    #[test]
    fn spacing_moves_the_cursor_without_placements() {
        let mut flow = flow();
        flow.begin_content_page().unwrap();
        flow.add_spacing(6.0);
        flow.add_spacing(-3.0);
        assert_eq!(flow.y(), 78.0);
        assert!(flow.placements().is_empty());
        assert!(!flow.is_at_page_top());
    }

    #[test]
    fn placements_record_page_and_extent() {
        let mut flow = flow();
        flow.begin_content_page().unwrap();
        let top = flow.place(PlacementKind::Heading, 20.0);
        assert_eq!(top, 72.0);
        let placement = flow.placements()[0];
        assert_eq!(placement.page, 1);
        assert_eq!(placement.bottom, 92.0);
        assert_eq!(flow.remaining(), 746.0 - 92.0);
    }

    #[test]
    fn keep_with_next_uses_allowance_for_tall_followers() {
        assert!((keep_with_next(20.0, 13.2, 300.0, 52.8) - 72.8).abs() < EPSILON);
        assert!((keep_with_next(20.0, 13.2, 13.2, 52.8) - 33.2).abs() < EPSILON);
        assert!((keep_with_next(20.0, 80.0, 80.0, 52.8) - 100.0).abs() < EPSILON);
    }
}
