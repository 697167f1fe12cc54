use serde::{Deserialize, Serialize};

/// Sticky positioning of a column to a viewport edge during horizontal
/// scroll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnPin {
    #[default]
    None,
    Left,
    Right,
}

/// Layout metadata for one rendered column, supplied by the table surface.
/// `offset` is measured in pixels from the pinned edge: from the left table
/// edge for left pinned columns, from the right edge for right pinned ones.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PinnedColumnLayout {
    pub pin: ColumnPin,
    /// This column touches the seam of the left pinned region.
    pub is_last_left: bool,
    /// This column touches the seam of the right pinned region.
    pub is_first_right: bool,
    pub offset: f32,
    pub width: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinPosition {
    Relative,
    Sticky,
}

/// Which edge of the column gets the seam shadow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeamShadow {
    /// Inset shadow on the trailing edge, for the last left pinned column.
    TrailingInset,
    /// Inset shadow on the leading edge, for the first right pinned column.
    LeadingInset,
}

/// Inline style for one column cell, ready for the rendering surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinStyle {
    pub position: PinPosition,
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub shadow: Option<SeamShadow>,
    pub opacity: f32,
    pub z_index: i8,
    pub width: f32,
}

/// Positioning for a sticky column. The seam shadow is emitted only for the
/// pinned column nearest the scrollable region and only when `with_border`
/// is set, so the visual cue does not repeat across every pinned column.
pub fn pinning_style(layout: &PinnedColumnLayout, with_border: bool) -> PinStyle {
    let shadow = if with_border {
        match layout.pin {
            ColumnPin::Left if layout.is_last_left => Some(SeamShadow::TrailingInset),
            ColumnPin::Right if layout.is_first_right => Some(SeamShadow::LeadingInset),
            _ => None,
        }
    } else {
        None
    };
    match layout.pin {
        ColumnPin::None => PinStyle {
            position: PinPosition::Relative,
            left: None,
            right: None,
            shadow: None,
            opacity: 1.0,
            z_index: 0,
            width: layout.width,
        },
        ColumnPin::Left => PinStyle {
            position: PinPosition::Sticky,
            left: Some(layout.offset),
            right: None,
            shadow,
            opacity: 0.97,
            z_index: 1,
            width: layout.width,
        },
        ColumnPin::Right => PinStyle {
            position: PinPosition::Sticky,
            left: None,
            right: Some(layout.offset),
            shadow,
            opacity: 0.97,
            z_index: 1,
            width: layout.width,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(pin: ColumnPin) -> PinnedColumnLayout {
        PinnedColumnLayout {
            pin,
            is_last_left: false,
            is_first_right: false,
            offset: 40.0,
            width: 120.0,
        }
    }

    #[test]
    fn unpinned_column_is_relative() {
        let style = pinning_style(&layout(ColumnPin::None), true);
        assert_eq!(style.position, PinPosition::Relative);
        assert_eq!(style.left, None);
        assert_eq!(style.right, None);
        assert_eq!(style.shadow, None);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.z_index, 0);
        assert_eq!(style.width, 120.0);
    }

    #[test]
    fn left_pinned_column_is_sticky_with_left_offset() {
        let style = pinning_style(&layout(ColumnPin::Left), true);
        assert_eq!(style.position, PinPosition::Sticky);
        assert_eq!(style.left, Some(40.0));
        assert_eq!(style.right, None);
        assert_eq!(style.shadow, None);
        assert_eq!(style.opacity, 0.97);
        assert_eq!(style.z_index, 1);
    }

    #[test]
    fn seam_shadow_only_on_last_left_column() {
        let seam = PinnedColumnLayout {
            is_last_left: true,
            ..layout(ColumnPin::Left)
        };
        assert_eq!(
            pinning_style(&seam, true).shadow,
            Some(SeamShadow::TrailingInset)
        );
        assert_eq!(pinning_style(&seam, false).shadow, None);
    }

    #[test]
    fn seam_shadow_only_on_first_right_column() {
        let inner = layout(ColumnPin::Right);
        assert_eq!(pinning_style(&inner, true).shadow, None);
        let seam = PinnedColumnLayout {
            is_first_right: true,
            ..inner
        };
        assert_eq!(
            pinning_style(&seam, true).shadow,
            Some(SeamShadow::LeadingInset)
        );
        assert_eq!(pinning_style(&seam, true).right, Some(40.0));
        assert_eq!(pinning_style(&seam, true).left, None);
    }

    #[test]
    fn width_carries_through_unchanged() {
        for pin in [ColumnPin::None, ColumnPin::Left, ColumnPin::Right] {
            assert_eq!(pinning_style(&layout(pin), true).width, 120.0);
        }
    }
}
