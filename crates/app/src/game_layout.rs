//! Layout model for the viewport and HUD panels.

use taffy::prelude::*;
use taffy::{TaffyError, TaffyTree};

pub struct LayoutNodes {
    root: NodeId,
    status: NodeId,
    main_row: NodeId,
    viewport: NodeId,
    event_log: NodeId,
    hud_row: NodeId,
    vitals: NodeId,
    abilities: NodeId,
    progress: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameLayout {
    pub status: PanelRect,
    pub viewport: PanelRect,
    pub event_log: PanelRect,
    pub vitals: PanelRect,
    pub abilities: PanelRect,
    pub progress: PanelRect,
}

impl FrameLayout {
    pub fn panels(&self) -> [PanelRect; 6] {
        [self.status, self.viewport, self.event_log, self.vitals, self.abilities, self.progress]
    }
}

fn left_margin(value: f32) -> taffy::Rect<LengthPercentageAuto> {
    taffy::Rect { left: length(value), right: zero(), top: zero(), bottom: zero() }
}

fn bottom_margin(value: f32) -> taffy::Rect<LengthPercentageAuto> {
    taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(value) }
}

pub fn setup_layout(taffy: &mut TaffyTree<()>, ui_scale: f32) -> Result<LayoutNodes, TaffyError> {
    let gap = 12.0 * ui_scale;
    let status = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(32.0 * ui_scale) },
        margin: bottom_margin(gap),
        ..Default::default()
    })?;
    let viewport = taffy.new_leaf(Style { flex_grow: 3.0, ..Default::default() })?;
    let event_log = taffy.new_leaf(Style {
        flex_grow: 1.0,
        min_size: Size { width: length(220.0 * ui_scale), height: auto() },
        margin: left_margin(gap),
        ..Default::default()
    })?;
    let main_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            flex_grow: 1.0,
            margin: bottom_margin(gap),
            ..Default::default()
        },
        &[viewport, event_log],
    )?;
    let vitals = taffy.new_leaf(Style { flex_grow: 1.2, ..Default::default() })?;
    let abilities = taffy.new_leaf(Style {
        flex_grow: 1.0,
        margin: left_margin(gap),
        ..Default::default()
    })?;
    let progress = taffy.new_leaf(Style {
        flex_grow: 1.0,
        margin: left_margin(gap),
        ..Default::default()
    })?;
    let hud_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: length(150.0 * ui_scale) },
            flex_shrink: 0.0,
            ..Default::default()
        },
        &[vitals, abilities, progress],
    )?;
    let padding = length(gap);
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            padding: taffy::Rect { left: padding, right: padding, top: padding, bottom: padding },
            ..Default::default()
        },
        &[status, main_row, hud_row],
    )?;
    Ok(LayoutNodes {
        root,
        status,
        main_row,
        viewport,
        event_log,
        hud_row,
        vitals,
        abilities,
        progress,
    })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<FrameLayout, TaffyError> {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size)?;

    let root = *taffy.layout(nodes.root)?;
    let main = *taffy.layout(nodes.main_row)?;
    let hud = *taffy.layout(nodes.hud_row)?;
    let panel = |node: NodeId, parents: &[&taffy::Layout]| -> Result<PanelRect, TaffyError> {
        Ok(panel_rect(taffy.layout(node)?, parents))
    };

    Ok(FrameLayout {
        status: panel(nodes.status, &[&root])?,
        viewport: panel(nodes.viewport, &[&root, &main])?,
        event_log: panel(nodes.event_log, &[&root, &main])?,
        vitals: panel(nodes.vitals, &[&root, &hud])?,
        abilities: panel(nodes.abilities, &[&root, &hud])?,
        progress: panel(nodes.progress, &[&root, &hud])?,
    })
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f32, height: f32) -> FrameLayout {
        let mut taffy = TaffyTree::new();
        let nodes = setup_layout(&mut taffy, 1.0).unwrap();
        compute_frame_layout(&mut taffy, &nodes, width, height).unwrap()
    }

    fn inside(inner: PanelRect, width: f32, height: f32) -> bool {
        inner.x >= 0.0
            && inner.y >= 0.0
            && inner.x + inner.width <= width + 0.5
            && inner.y + inner.height <= height + 0.5
    }

    #[test]
    fn viewport_takes_the_largest_share() {
        let frame = layout(1000.0, 750.0);
        assert!(frame.viewport.width > frame.event_log.width);
        assert!(frame.viewport.height > frame.vitals.height);
        assert!(frame.viewport.y > frame.status.y);
        assert!(frame.vitals.y > frame.viewport.y);
    }

    #[test]
    fn panels_stay_inside_the_window() {
        for (width, height) in [(1000.0, 750.0), (640.0, 480.0), (1920.0, 1080.0)] {
            let frame = layout(width, height);
            for panel in frame.panels() {
                assert!(inside(panel, width, height), "{panel:?} in {width}x{height}");
            }
        }
    }

    #[test]
    fn hud_panels_share_one_row() {
        let frame = layout(1000.0, 750.0);
        assert_eq!(frame.vitals.y, frame.abilities.y);
        assert_eq!(frame.abilities.y, frame.progress.y);
        assert!(frame.vitals.x < frame.abilities.x && frame.abilities.x < frame.progress.x);
    }
}
