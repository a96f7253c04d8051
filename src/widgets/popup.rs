use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Area directly under `anchor`, clamped to the frame
pub fn popup_below_anchor(
    anchor: Rect,
    frame_area: Rect,
    width: u16,
    height: u16,
    x_offset: u16,
) -> Rect {
    let popup_x = anchor.x + x_offset;
    let popup_y = anchor.y.saturating_add(anchor.height);
    let available_height = frame_area.bottom().saturating_sub(popup_y);

    Rect {
        x: popup_x,
        y: popup_y,
        width: width.min(anchor.width.saturating_sub(x_offset * 2)),
        height: height.min(available_height),
    }
}

pub fn popup_above_anchor(anchor: Rect, width: u16, height: u16, x_offset: u16) -> Rect {
    let popup_x = anchor.x + x_offset;
    let popup_y = anchor.y.saturating_sub(height);

    Rect {
        x: popup_x,
        y: popup_y,
        width: width.min(anchor.width.saturating_sub(x_offset * 2)),
        height: height.min(anchor.y),
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_below_anchor_basic() {
        let frame = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(0, 3, 80, 3);

        let popup = popup_below_anchor(anchor, frame, 30, 5, 2);

        assert_eq!(popup.x, 2);
        assert_eq!(popup.y, 6);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn test_popup_below_anchor_clamped_to_frame_bottom() {
        let frame = Rect::new(0, 0, 80, 10);
        let anchor = Rect::new(0, 5, 80, 3);

        let popup = popup_below_anchor(anchor, frame, 30, 8, 2);

        assert_eq!(popup.y, 8);
        assert_eq!(popup.height, 2);
    }

    #[test]
    fn test_popup_width_clamped_to_anchor() {
        let frame = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(0, 0, 20, 3);

        let popup = popup_below_anchor(anchor, frame, 50, 5, 2);

        assert_eq!(popup.width, 16);
    }

    #[test]
    fn test_popup_above_anchor_basic() {
        let anchor = Rect::new(0, 20, 80, 3);

        let popup = popup_above_anchor(anchor, 30, 5, 2);

        assert_eq!(popup.x, 2);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.height, 5);
    }
}
