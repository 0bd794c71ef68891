//! Color chooser: a palette of swatches, optional shade palettes and an
//! ARGB channel page.
//!
//! ## Usage
//!
//! Call [`color_chooser`] from the dialog content on every composition pass.
//! Clicking a palette swatch selects it and, when shades are configured for
//! it, opens its shade palette. The custom page edits the selection channel
//! by channel.
use derive_setters::Setters;
use material_dialogs_ui::{CallbackWith, Color, State};
use tracing::{debug, warn};

use crate::{
    dialog::{DialogScope, MaterialDialog},
    notify::{NotifyMode, bind_selection},
    picker_grid::{GridCell, PickerGrid},
};

/// Columns of the swatch grids.
pub const SWATCH_COLUMNS: usize = 4;

const PRIMARY: [u32; 19] = [
    0xF44336, 0xE91E63, 0x9C27B0, 0x673AB7, 0x3F51B5, 0x2196F3, 0x03A9F4, 0x00BCD4, 0x009688,
    0x4CAF50, 0x8BC34A, 0xCDDC39, 0xFFEB3B, 0xFFC107, 0xFF9800, 0xFF5722, 0x795548, 0x9E9E9E,
    0x607D8B,
];

// Shades 50, 100, 200 ... 900 of each primary color, in the same order.
#[rustfmt::skip]
const PRIMARY_SUB: [[u32; 10]; 19] = [
    [0xFFEBEE, 0xFFCDD2, 0xEF9A9A, 0xE57373, 0xEF5350, 0xF44336, 0xE53935, 0xD32F2F, 0xC62828, 0xB71C1C],
    [0xFCE4EC, 0xF8BBD0, 0xF48FB1, 0xF06292, 0xEC407A, 0xE91E63, 0xD81B60, 0xC2185B, 0xAD1457, 0x880E4F],
    [0xF3E5F5, 0xE1BEE7, 0xCE93D8, 0xBA68C8, 0xAB47BC, 0x9C27B0, 0x8E24AA, 0x7B1FA2, 0x6A1B9A, 0x4A148C],
    [0xEDE7F6, 0xD1C4E9, 0xB39DDB, 0x9575CD, 0x7E57C2, 0x673AB7, 0x5E35B1, 0x512DA8, 0x4527A0, 0x311B92],
    [0xE8EAF6, 0xC5CAE9, 0x9FA8DA, 0x7986CB, 0x5C6BC0, 0x3F51B5, 0x3949AB, 0x303F9F, 0x283593, 0x1A237E],
    [0xE3F2FD, 0xBBDEFB, 0x90CAF9, 0x64B5F6, 0x42A5F5, 0x2196F3, 0x1E88E5, 0x1976D2, 0x1565C0, 0x0D47A1],
    [0xE1F5FE, 0xB3E5FC, 0x81D4FA, 0x4FC3F7, 0x29B6F6, 0x03A9F4, 0x039BE5, 0x0288D1, 0x0277BD, 0x01579B],
    [0xE0F7FA, 0xB2EBF2, 0x80DEEA, 0x4DD0E1, 0x26C6DA, 0x00BCD4, 0x00ACC1, 0x0097A7, 0x00838F, 0x006064],
    [0xE0F2F1, 0xB2DFDB, 0x80CBC4, 0x4DB6AC, 0x26A69A, 0x009688, 0x00897B, 0x00796B, 0x00695C, 0x004D40],
    [0xE8F5E9, 0xC8E6C9, 0xA5D6A7, 0x81C784, 0x66BB6A, 0x4CAF50, 0x43A047, 0x388E3C, 0x2E7D32, 0x1B5E20],
    [0xF1F8E9, 0xDCEDC8, 0xC5E1A5, 0xAED581, 0x9CCC65, 0x8BC34A, 0x7CB342, 0x689F38, 0x558B2F, 0x33691E],
    [0xF9FBE7, 0xF0F4C3, 0xE6EE9C, 0xDCE775, 0xD4E157, 0xCDDC39, 0xC0CA33, 0xAFB42B, 0x9E9D24, 0x827717],
    [0xFFFDE7, 0xFFF9C4, 0xFFF59D, 0xFFF176, 0xFFEE58, 0xFFEB3B, 0xFDD835, 0xFBC02D, 0xF9A825, 0xF57F17],
    [0xFFF8E1, 0xFFECB3, 0xFFE082, 0xFFD54F, 0xFFCA28, 0xFFC107, 0xFFB300, 0xFFA000, 0xFF8F00, 0xFF6F00],
    [0xFFF3E0, 0xFFE0B2, 0xFFCC80, 0xFFB74D, 0xFFA726, 0xFF9800, 0xFB8C00, 0xF57C00, 0xEF6C00, 0xE65100],
    [0xFBE9E7, 0xFFCCBC, 0xFFAB91, 0xFF8A65, 0xFF7043, 0xFF5722, 0xF4511E, 0xE64A19, 0xD84315, 0xBF360C],
    [0xEFEBE9, 0xD7CCC8, 0xBCAAA4, 0xA1887F, 0x8D6E63, 0x795548, 0x6D4C41, 0x5D4037, 0x4E342E, 0x3E2723],
    [0xFAFAFA, 0xF5F5F5, 0xEEEEEE, 0xE0E0E0, 0xBDBDBD, 0x9E9E9E, 0x757575, 0x616161, 0x424242, 0x212121],
    [0xECEFF1, 0xCFD8DC, 0xB0BEC5, 0x90A4AE, 0x78909C, 0x607D8B, 0x546E7A, 0x455A64, 0x37474F, 0x263238],
];

fn opaque(rgb: u32) -> Color {
    Color::from_argb(0xFF00_0000 | rgb)
}

/// Built-in Material palettes.
pub struct ColorPalette;

impl ColorPalette {
    /// The nineteen Material 500 colors, red first.
    pub fn primary() -> Vec<Color> {
        PRIMARY.iter().copied().map(opaque).collect()
    }

    /// Ten shades (50 to 900) for each color of [`Self::primary`].
    pub fn primary_sub() -> Vec<Vec<Color>> {
        PRIMARY_SUB
            .iter()
            .map(|shades| shades.iter().copied().map(opaque).collect())
            .collect()
    }
}

/// Which channels the custom page edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgbSelector {
    /// No custom page.
    #[default]
    None,
    /// Red, green and blue; custom colors are opaque.
    WithoutAlpha,
    /// Alpha, red, green and blue.
    WithAlpha,
}

/// The two pages of the chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPage {
    /// Palette swatches.
    #[default]
    Presets,
    /// ARGB channels.
    Custom,
}

/// One channel of the custom page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgbChannel {
    /// Opacity.
    Alpha,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
}

impl ArgbChannel {
    fn shift(self) -> u32 {
        match self {
            ArgbChannel::Alpha => 24,
            ArgbChannel::Red => 16,
            ArgbChannel::Green => 8,
            ArgbChannel::Blue => 0,
        }
    }
}

/// Selection and navigation state of a color chooser.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorChooserState {
    colors: Vec<Color>,
    sub_colors: Vec<Vec<Color>>,
    argb_selector: ArgbSelector,
    palette_index: Option<usize>,
    sub_palette_showing: bool,
    page: ColorPage,
    selected: Option<Color>,
}

impl ColorChooserState {
    /// Creates the state with `colors[initial_selection]` selected. An
    /// out-of-bounds initial selection falls back to the first color.
    pub fn new(
        colors: Vec<Color>,
        sub_colors: Vec<Vec<Color>>,
        initial_selection: usize,
        argb_selector: ArgbSelector,
    ) -> Self {
        let palette_index = match initial_selection {
            index if index < colors.len() => Some(index),
            _ if colors.is_empty() => None,
            index => {
                warn!(index, "initial color is out of bounds, using the first");
                Some(0)
            }
        };
        let selected = palette_index.and_then(|index| colors.get(index).copied());
        Self {
            colors,
            sub_colors,
            argb_selector,
            palette_index,
            sub_palette_showing: false,
            page: ColorPage::Presets,
            selected,
        }
    }

    /// The selected color.
    pub fn selected(&self) -> Option<Color> {
        self.selected
    }

    /// Index of the highlighted palette swatch.
    pub fn palette_index(&self) -> Option<usize> {
        self.palette_index
    }

    /// Whether the shade palette of the highlighted swatch is showing.
    pub fn is_sub_palette_showing(&self) -> bool {
        self.sub_palette_showing
    }

    /// The visible page.
    pub fn page(&self) -> ColorPage {
        self.page
    }

    /// Which channels the custom page edits.
    pub fn argb_selector(&self) -> ArgbSelector {
        self.argb_selector
    }

    /// Shades of palette swatch `index`; empty when none are configured.
    pub fn shades(&self, index: usize) -> &[Color] {
        self.sub_colors.get(index).map_or(&[], Vec::as_slice)
    }

    /// Selects palette swatch `index` and opens its shades, if any.
    pub fn select_palette(&mut self, index: usize) -> bool {
        let Some(color) = self.colors.get(index).copied() else {
            debug!(index, "palette index out of bounds");
            return false;
        };
        self.palette_index = Some(index);
        self.selected = Some(color);
        self.sub_palette_showing = !self.shades(index).is_empty();
        true
    }

    /// Selects shade `index` of the open shade palette.
    pub fn select_shade(&mut self, index: usize) -> bool {
        if !self.sub_palette_showing {
            debug!(index, "no shade palette open");
            return false;
        }
        let shade = self
            .palette_index
            .and_then(|parent| self.shades(parent).get(index).copied());
        let Some(shade) = shade else {
            debug!(index, "shade index out of bounds");
            return false;
        };
        self.selected = Some(shade);
        true
    }

    /// Returns from the shade palette to the main palette.
    pub fn close_sub_palette(&mut self) -> bool {
        std::mem::replace(&mut self.sub_palette_showing, false)
    }

    /// Switches pages. The custom page is refused without an ARGB selector.
    pub fn set_page(&mut self, page: ColorPage) -> bool {
        if page == ColorPage::Custom && self.argb_selector == ArgbSelector::None {
            debug!("custom color page is disabled");
            return false;
        }
        self.page = page;
        true
    }

    /// The selection as `[alpha, red, green, blue]`; opaque black when
    /// nothing is selected.
    pub fn channels(&self) -> [u8; 4] {
        self.selected.unwrap_or(Color::BLACK).to_argb().to_be_bytes()
    }

    /// Sets one channel of the selection. Alpha is refused unless the alpha
    /// selector is enabled.
    pub fn set_channel(&mut self, channel: ArgbChannel, value: u8) -> bool {
        let allowed = match self.argb_selector {
            ArgbSelector::None => false,
            ArgbSelector::WithoutAlpha => channel != ArgbChannel::Alpha,
            ArgbSelector::WithAlpha => true,
        };
        if !allowed {
            debug!(?channel, "channel is not editable");
            return false;
        }
        let mut argb = u32::from_be_bytes(self.channels());
        if self.argb_selector == ArgbSelector::WithoutAlpha {
            argb |= 0xFF00_0000;
        }
        let shift = channel.shift();
        argb = (argb & !(0xFF << shift)) | (u32::from(value) << shift);
        self.selected = Some(Color::from_argb(argb));
        true
    }
}

/// Configuration for [`color_chooser`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct ColorChooserArgs {
    /// Main palette.
    #[setters(skip)]
    pub colors: Vec<Color>,
    /// Shade palettes, one per main palette swatch.
    pub sub_colors: Vec<Vec<Color>>,
    /// Index of the swatch selected when the dialog opens.
    pub initial_selection: usize,
    /// Channels offered by the custom page.
    pub argb_selector: ArgbSelector,
    /// Report the selection only when the positive button fires.
    pub wait_for_positive_button: bool,
}

impl Default for ColorChooserArgs {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            sub_colors: Vec::new(),
            initial_selection: 0,
            argb_selector: ArgbSelector::None,
            wait_for_positive_button: false,
        }
    }
}

impl ColorChooserArgs {
    /// Creates args for the given main palette.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// What the chooser draws below its page tabs.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorChooserBody {
    /// Main palette; the highlighted swatch is selected.
    Palette(PickerGrid<Color>),
    /// Shades of palette swatch `parent`, with a back button.
    Shades {
        /// Index of the swatch the shades belong to.
        parent: usize,
        /// Shade swatches; the one equal to the selection is selected.
        grid: PickerGrid<Color>,
    },
    /// ARGB channels of the selection. `alpha` is `None` without the alpha
    /// selector.
    Channels {
        /// Alpha channel, when editable.
        alpha: Option<u8>,
        /// Red channel.
        red: u8,
        /// Green channel.
        green: u8,
        /// Blue channel.
        blue: u8,
    },
}

/// A color chooser produced by [`color_chooser`].
#[derive(Debug, Clone)]
pub struct ColorChooserView {
    dialog: MaterialDialog,
    state: State<ColorChooserState>,
    selected: Option<Color>,
    page: ColorPage,
    has_custom_page: bool,
    body: ColorChooserBody,
}

impl ColorChooserView {
    /// Handle to the remembered chooser state.
    pub fn state(&self) -> State<ColorChooserState> {
        self.state
    }

    /// The selected color.
    pub fn selected(&self) -> Option<Color> {
        self.selected
    }

    /// The visible page.
    pub fn page(&self) -> ColorPage {
        self.page
    }

    /// Whether the page tabs are shown.
    pub fn has_custom_page(&self) -> bool {
        self.has_custom_page
    }

    /// What to draw.
    pub fn body(&self) -> &ColorChooserBody {
        &self.body
    }

    /// Clicks a swatch of the palette or shade grid.
    pub fn click(&self, index: usize) -> bool {
        match &self.body {
            ColorChooserBody::Palette(_) => self.update(|state| state.select_palette(index)),
            ColorChooserBody::Shades { .. } => self.update(|state| state.select_shade(index)),
            ColorChooserBody::Channels { .. } => false,
        }
    }

    /// Clicks the back button of the shade grid.
    pub fn back(&self) -> bool {
        self.update(ColorChooserState::close_sub_palette)
    }

    /// Clicks a page tab.
    pub fn show_page(&self, page: ColorPage) -> bool {
        self.update(|state| state.set_page(page))
    }

    /// Drags a channel slider to `value`. Only the custom page accepts it.
    pub fn set_channel(&self, channel: ArgbChannel, value: u8) -> bool {
        if self.page != ColorPage::Custom {
            debug!(?channel, "channel edited off the custom page");
            return false;
        }
        self.update(|state| state.set_channel(channel, value))
    }

    fn update(&self, f: impl FnOnce(&mut ColorChooserState) -> bool) -> bool {
        let accepted = self.state.try_with_mut(f).unwrap_or_else(|err| {
            warn!(%err, "color chooser state is gone");
            false
        });
        if accepted {
            self.dialog.set_positive_enabled(self.state, true);
        }
        accepted
    }
}

/// A color chooser. The positive button stays disabled while nothing is
/// selected, which only happens with an empty palette.
///
/// `on_color_selected` receives the selection on confirmation when
/// `wait_for_positive_button` is set, otherwise on every change.
pub fn color_chooser(
    dialog: &DialogScope,
    args: impl Into<ColorChooserArgs>,
    on_color_selected: impl Into<CallbackWith<Color>>,
) -> ColorChooserView {
    let args: ColorChooserArgs = args.into();
    let state = dialog.remember(|| {
        ColorChooserState::new(
            args.colors.clone(),
            args.sub_colors.clone(),
            args.initial_selection,
            args.argb_selector,
        )
    });

    let selected = state.with(ColorChooserState::selected);
    dialog.set_positive_enabled(state, selected.is_some());
    bind_selection(
        dialog,
        state,
        NotifyMode::from_wait_for_positive_button(args.wait_for_positive_button),
        ColorChooserState::selected,
        on_color_selected.into(),
    );

    state.with(|snapshot| ColorChooserView {
        dialog: dialog.dialog().clone(),
        state,
        selected: snapshot.selected(),
        page: snapshot.page(),
        has_custom_page: snapshot.argb_selector() != ArgbSelector::None,
        body: build_body(snapshot),
    })
}

fn build_body(state: &ColorChooserState) -> ColorChooserBody {
    if state.page() == ColorPage::Custom {
        let [alpha, red, green, blue] = state.channels();
        return ColorChooserBody::Channels {
            alpha: (state.argb_selector() == ArgbSelector::WithAlpha).then_some(alpha),
            red,
            green,
            blue,
        };
    }
    match state.palette_index() {
        Some(parent) if state.is_sub_palette_showing() => {
            let selected = state.selected();
            let grid = swatch_grid(state.shades(parent), |_, color| Some(color) == selected);
            ColorChooserBody::Shades { parent, grid }
        }
        highlighted => ColorChooserBody::Palette(swatch_grid(&state.colors, |index, _| {
            Some(index) == highlighted
        })),
    }
}

fn swatch_grid(
    colors: &[Color],
    is_selected: impl Fn(usize, Color) -> bool,
) -> PickerGrid<Color> {
    let cells: Vec<_> = colors
        .iter()
        .enumerate()
        .map(|(index, color)| {
            Some(GridCell {
                value: *color,
                label: format!("{:06X}", color.to_argb() & 0x00FF_FFFF),
                selected: is_selected(index, *color),
                is_today: false,
                enabled: true,
            })
        })
        .collect();
    let initial = cells
        .iter()
        .position(|cell| cell.as_ref().is_some_and(|cell| cell.selected))
        .unwrap_or(0);
    PickerGrid::new(SWATCH_COLUMNS, cells, initial)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::dialog::MaterialDialogArgs;

    fn dialog() -> MaterialDialog {
        let dialog = MaterialDialog::new(
            MaterialDialogArgs::default()
                .positive_button("Select")
                .negative_button("Cancel"),
        );
        dialog.show();
        dialog
    }

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, CallbackWith<Color>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            CallbackWith::new(move |color: Color| seen.lock().push(color.to_argb()))
        };
        (seen, sink)
    }

    fn shaded() -> ColorChooserArgs {
        ColorChooserArgs::new(ColorPalette::primary()).sub_colors(ColorPalette::primary_sub())
    }

    #[test]
    fn palettes_line_up() {
        let primary = ColorPalette::primary();
        let shades = ColorPalette::primary_sub();
        assert_eq!(primary.len(), 19);
        assert_eq!(shades.len(), 19);
        for (color, shades) in primary.iter().zip(&shades) {
            assert_eq!(shades.len(), 10);
            // Shade 500 is the primary color itself.
            assert_eq!(shades[5], *color);
        }
    }

    #[test]
    fn initial_selection_is_reported_on_confirmation() {
        let dialog = dialog();
        let (seen, sink) = recorder();
        let args = shaded().initial_selection(5).wait_for_positive_button(true);
        let view = dialog
            .compose(|scope| color_chooser(scope, args, sink))
            .expect("dialog is showing");

        let ColorChooserBody::Palette(grid) = view.body() else {
            panic!("palette expected");
        };
        assert_eq!(grid.columns(), SWATCH_COLUMNS);
        assert_eq!(grid.selected_index(), Some(5));
        assert_eq!(grid.initial_scroll_index(), 5);
        assert_eq!(grid.cell(5).expect("filled").label, "2196F3");
        assert!(dialog.is_positive_enabled());
        assert!(seen.lock().is_empty());

        dialog.submit().expect("positive button enabled");
        assert_eq!(*seen.lock(), vec![0xFF21_96F3]);
    }

    #[test]
    fn out_of_bounds_initial_selection_falls_back() {
        let primary = ColorPalette::primary();
        let state = ColorChooserState::new(primary, Vec::new(), 40, ArgbSelector::None);
        assert_eq!(state.palette_index(), Some(0));
        let empty = ColorChooserState::new(Vec::new(), Vec::new(), 0, ArgbSelector::None);
        assert_eq!(empty.selected(), None);
        assert_eq!(empty.channels(), [0xFF, 0, 0, 0]);
    }

    #[test]
    fn palette_click_opens_shades() {
        let dialog = dialog();
        let (seen, sink) = recorder();
        let args = shaded().wait_for_positive_button(true);
        let compose = || {
            dialog
                .compose(|scope| color_chooser(scope, args.clone(), sink.clone()))
                .expect("dialog is showing")
        };

        assert!(compose().click(3));
        let view = compose();
        let ColorChooserBody::Shades { parent, grid } = view.body() else {
            panic!("shade grid expected");
        };
        assert_eq!(*parent, 3);
        assert_eq!(grid.len(), 10);
        assert_eq!(grid.selected_index(), Some(5));
        assert!(view.click(9));
        assert!(!view.click(10));

        let view = compose();
        assert_eq!(view.selected().map(Color::to_argb), Some(0xFF31_1B92));
        assert!(view.back());
        assert!(!view.back());
        let view = compose();
        let ColorChooserBody::Palette(grid) = view.body() else {
            panic!("palette expected");
        };
        assert_eq!(grid.selected_index(), Some(3));

        dialog.submit().expect("positive button enabled");
        assert_eq!(*seen.lock(), vec![0xFF31_1B92]);
    }

    #[test]
    fn palette_without_shades_stays_open() {
        let primary = ColorPalette::primary();
        let mut state = ColorChooserState::new(primary.clone(), Vec::new(), 0, ArgbSelector::None);
        assert!(state.select_palette(2));
        assert!(!state.is_sub_palette_showing());
        assert!(!state.select_shade(0));
        assert!(!state.select_palette(19));
        assert_eq!(state.selected(), Some(primary[2]));
    }

    #[test]
    fn immediate_mode_reports_each_change() {
        let dialog = dialog();
        let (seen, sink) = recorder();
        let args = shaded();
        let compose = || {
            dialog
                .compose(|scope| color_chooser(scope, args.clone(), sink.clone()))
                .expect("dialog is showing")
        };

        let view = compose();
        assert_eq!(*seen.lock(), vec![0xFFF4_4336]);
        // Reselecting red keeps the reported color.
        assert!(view.click(0));
        let view = compose();
        assert!(view.click(9));
        compose();
        assert_eq!(*seen.lock(), vec![0xFFF4_4336, 0xFFB7_1C1C]);
    }

    #[test]
    fn custom_page_edits_channels() {
        let dialog = dialog();
        let (seen, sink) = recorder();
        let args = shaded()
            .argb_selector(ArgbSelector::WithoutAlpha)
            .wait_for_positive_button(true);
        let compose = || {
            dialog
                .compose(|scope| color_chooser(scope, args.clone(), sink.clone()))
                .expect("dialog is showing")
        };

        let view = compose();
        assert!(view.has_custom_page());
        assert!(!view.set_channel(ArgbChannel::Red, 1));
        assert!(view.show_page(ColorPage::Custom));

        let view = compose();
        assert_eq!(
            view.body(),
            &ColorChooserBody::Channels {
                alpha: None,
                red: 0xF4,
                green: 0x43,
                blue: 0x36
            }
        );
        assert!(view.set_channel(ArgbChannel::Green, 0x80));
        assert!(!view.set_channel(ArgbChannel::Alpha, 0x10));
        assert!(!view.click(0));

        dialog.submit().expect("positive button enabled");
        assert_eq!(*seen.lock(), vec![0xFFF4_8036]);
    }

    #[test]
    fn alpha_selector_edits_opacity() {
        let primary = ColorPalette::primary();
        let mut state =
            ColorChooserState::new(primary.clone(), Vec::new(), 0, ArgbSelector::WithAlpha);
        assert!(state.set_page(ColorPage::Custom));
        assert!(state.set_channel(ArgbChannel::Alpha, 0x80));
        assert!(state.set_channel(ArgbChannel::Blue, 0xFF));
        assert_eq!(state.channels(), [0x80, 0xF4, 0x43, 0xFF]);

        let mut plain = ColorChooserState::new(primary, Vec::new(), 0, ArgbSelector::None);
        assert!(!plain.set_page(ColorPage::Custom));
        assert!(!plain.set_channel(ArgbChannel::Red, 0));
        assert_eq!(plain.page(), ColorPage::Presets);
    }
}
