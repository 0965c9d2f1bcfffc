// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based camera viewer
//!
//! Draws the camera screen to the terminal. Images are rendered with Unicode
//! half-block characters for improved vertical resolution.

use crate::app::gallery::{GalleryView, render_gallery};
use crate::app::state::{Screen, ViewState};
use crate::app::ui::{
    Action, BottomBar, CameraView, ChromeBar, Control, Icon, Viewfinder, ViewfinderContent,
    layout_rows,
};
use crate::app::{CameraScreen, ViewModel};
use crate::backends::camera::{CameraController, CameraFrame, CameraManager};
use crate::config::Config;
use crate::constants::{timing, ui};
use crate::errors::PhotoResult;
use crate::photo_library::{PhotoCollection, Thumbnail};
use crate::pipelines::photo::PhotoPipeline;
use crate::storage;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, List, ListItem, ListState, Paragraph, Widget},
};
use futures::FutureExt;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Terminal columns per layout point when spacing the bottom bar controls
const POINTS_PER_COLUMN: f32 = 10.0;

/// Width of one bottom bar control slot in columns
const CONTROL_SLOT_WIDTH: u16 = 14;

/// Run the terminal camera viewer
pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = Runtime::new()?;
    // View model tasks are spawned from this thread
    let _guard = runtime.enter();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &runtime, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Input commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Control(Action),
    ExitGallery,
    SelectNext,
    SelectPrevious,
    OpenPhoto,
}

fn command_for_key(screen: Screen, key: KeyEvent) -> Option<Command> {
    // Ctrl+C quits everywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    match (screen, key.code) {
        (_, KeyCode::Char('q')) => Some(Command::Quit),
        (Screen::Camera, KeyCode::Char(' ') | KeyCode::Char('p')) => {
            Some(Command::Control(Action::TakePhoto))
        }
        (Screen::Camera, KeyCode::Char('s')) => Some(Command::Control(Action::SwitchCamera)),
        (Screen::Camera, KeyCode::Char('g')) => Some(Command::Control(Action::OpenGallery)),
        (Screen::Gallery, KeyCode::Esc | KeyCode::Char('b')) => Some(Command::ExitGallery),
        (Screen::Gallery, KeyCode::Down | KeyCode::Char('j')) => Some(Command::SelectNext),
        (Screen::Gallery, KeyCode::Up | KeyCode::Char('k')) => Some(Command::SelectPrevious),
        (Screen::Gallery, KeyCode::Enter | KeyCode::Char('o')) => Some(Command::OpenPhoto),
        _ => None,
    }
}

/// Clears notices once they have been shown long enough
#[derive(Default)]
struct NoticeTimer {
    current: Option<(String, Instant)>,
}

impl NoticeTimer {
    /// Returns true when the shown notice has expired
    fn expired(&mut self, notice: Option<&str>, now: Instant) -> bool {
        match (notice, &self.current) {
            (None, _) => {
                self.current = None;
                false
            }
            (Some(text), Some((shown, since))) if shown == text => {
                now.duration_since(*since) >= timing::STATUS_MESSAGE_TTL
            }
            (Some(text), _) => {
                self.current = Some((text.to_string(), now));
                false
            }
        }
    }
}

/// Preview of the selected gallery photo
///
/// The decode runs on the runtime, finished loads are picked up by
/// [`GalleryPreview::update`] on a later tick.
#[derive(Default)]
struct GalleryPreview {
    path: Option<PathBuf>,
    thumbnail: Option<Thumbnail>,
    pending: Option<JoinHandle<PhotoResult<Thumbnail>>>,
}

impl GalleryPreview {
    /// Follow the selection, returns true when the preview changed
    fn update(&mut self, runtime: &Runtime, selected: Option<&PathBuf>) -> bool {
        if self.path.as_ref() != selected {
            if let Some(pending) = self.pending.take() {
                pending.abort();
            }
            self.path = selected.cloned();
            self.thumbnail = None;
            self.pending = selected.map(|path| runtime.spawn(storage::load_thumbnail(path.clone())));
            return true;
        }

        let Some(result) = self.pending.as_mut().and_then(|pending| pending.now_or_never()) else {
            return false;
        };
        self.pending = None;
        match result {
            Ok(Ok(thumbnail)) => self.thumbnail = Some(thumbnail),
            Ok(Err(e)) => {
                if let Some(path) = &self.path {
                    warn!(path = %path.display(), error = %e, "Failed to load preview");
                }
            }
            Err(e) => warn!(error = %e, "Preview task failed"),
        }
        true
    }

    fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &Runtime,
    mut config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let camera = Arc::new(CameraManager::from_config(&config));
    let photos = Arc::new(PhotoCollection::new(
        config.photo_directory(),
        PhotoPipeline::from_config(&config),
    ));
    info!(
        cameras = camera.available_devices().len(),
        photo_dir = %photos.directory().display(),
        "Starting terminal viewer"
    );

    let model = ViewModel::new(camera.clone(), photos).with_mirror(config.mirror_preview);
    let mut screen = CameraScreen::new(model);
    screen.on_appear();

    let mut notices = NoticeTimer::default();
    let mut preview = GalleryPreview::default();
    let mut changes = screen.model().subscribe();
    let mut redraw = true;

    loop {
        let state = screen.model().snapshot();
        if notices.expired(state.notice.as_deref(), Instant::now()) {
            screen.model().clear_notice();
        }

        match screen.screen() {
            Screen::Camera if redraw => {
                let device_name = camera
                    .current_device()
                    .map(|device| device.name)
                    .unwrap_or_default();
                let view = CameraScreen::render(&state);
                terminal.draw(|f| draw_camera(f, &view, &state, &device_name))?;
            }
            Screen::Camera => {}
            Screen::Gallery => {
                let gallery = render_gallery(&screen.model().photos().photos(), screen.gallery());
                let changed = preview.update(runtime, gallery.selected().map(|entry| &entry.path));
                if redraw || changed {
                    terminal.draw(|f| draw_gallery(f, &gallery, &preview))?;
                }
            }
        }

        if !event::poll(Duration::ZERO)? {
            // Redraw on the next state change, or after one poll interval
            redraw = runtime.block_on(async {
                tokio::time::timeout(timing::UI_POLL_INTERVAL, changes.changed())
                    .await
                    .is_ok()
            });
            continue;
        }

        // Input and resize events always redraw
        redraw = true;
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match command_for_key(screen.screen(), key) {
                Some(Command::Quit) => break,
                Some(Command::Control(action)) => screen.handle(action),
                Some(Command::ExitGallery) => screen.on_exit_gallery(),
                Some(Command::SelectNext) => {
                    let count = screen.model().photos().photos().len();
                    screen.gallery_mut().select_next(count);
                }
                Some(Command::SelectPrevious) => screen.gallery_mut().select_previous(),
                Some(Command::OpenPhoto) => {
                    if let Some(path) = &preview.path
                        && let Err(e) = open::that_detached(path)
                    {
                        error!(path = %path.display(), error = %e, "Failed to open photo");
                    }
                }
                None => {}
            }
        }
    }

    screen.model().teardown();
    if let Err(e) = runtime.block_on(camera.stop()) {
        warn!(error = %e, "Failed to stop camera");
    }

    config.last_camera_path = camera.current_device().map(|device| device.path);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    Ok(())
}

fn draw_camera(f: &mut Frame, view: &CameraView, state: &ViewState, device_name: &str) {
    let area = f.area();

    // Reserve bottom line for status
    let screen_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let [top, _, bottom] = layout_rows(screen_area.height);

    // The preview fills the screen, the bars are drawn over it
    f.render_widget(ViewfinderWidget { viewfinder: &view.viewfinder }, screen_area);
    f.render_widget(
        ChromeBarWidget {
            bar: view.top_bar,
            title: device_name,
        },
        Rect {
            height: top,
            ..screen_area
        },
    );
    f.render_widget(
        BottomBarWidget {
            bar: &view.bottom_bar,
        },
        Rect {
            y: screen_area.y + screen_area.height - bottom,
            height: bottom,
            ..screen_area
        },
    );

    let hints = "space/p photo | s switch | g gallery | q quit";
    let status = StatusBar {
        message: state.notice.as_deref().unwrap_or(hints),
    };
    f.render_widget(
        status,
        Rect {
            y: area.y + area.height.saturating_sub(1),
            height: area.height.min(1),
            ..area
        },
    );
}

fn draw_gallery(f: &mut Frame, gallery: &GalleryView, preview: &GalleryPreview) {
    let area = f.area();
    let [main, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let [list_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(main);

    let items: Vec<ListItem> = gallery
        .entries
        .iter()
        .map(|entry| ListItem::new(format!("{}  {}  {}", entry.file_name, entry.taken, entry.size)))
        .collect();
    let mut list_state = ListState::default()
        .with_selected(gallery.entries.iter().position(|entry| entry.selected));
    let list = List::new(items)
        .block(Block::bordered().title(format!(" {} ", ui::GALLERY_LABEL)))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, list_area, &mut list_state);

    let block = Block::bordered();
    let inner = block.inner(preview_area);
    f.render_widget(block, preview_area);
    match &preview.thumbnail {
        Some(thumbnail) => f.render_widget(
            PixelWidget {
                source: thumbnail,
                mirrored: false,
            },
            inner,
        ),
        None => {
            let message = if gallery.is_empty() {
                "No photos yet"
            } else if preview.is_loading() {
                "Loading preview..."
            } else {
                "No preview"
            };
            f.render_widget(CenteredText { text: message }, inner);
        }
    }

    f.render_widget(
        StatusBar {
            message: "up/down select | o open | esc back | q quit",
        },
        status_area,
    );
}

/// Anything drawable with half-block pixels
trait PixelSource {
    fn size(&self) -> (u32, u32);
    fn pixel_rgb(&self, x: u32, y: u32) -> (u8, u8, u8);
}

impl PixelSource for CameraFrame {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        CameraFrame::pixel_rgb(self, x, y)
    }
}

impl PixelSource for Thumbnail {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        Thumbnail::pixel_rgb(self, x, y)
    }
}

/// Widget that renders an image using half-block characters
struct PixelWidget<'a, P: PixelSource + ?Sized> {
    source: &'a P,
    /// Flip horizontally
    mirrored: bool,
}

impl<P: PixelSource + ?Sized> Widget for PixelWidget<'_, P> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.source.size();
        if width == 0 || height == 0 || area.is_empty() {
            return;
        }

        // Calculate display dimensions maintaining aspect ratio
        // Each terminal cell displays 2 vertical pixels using half-block characters
        let aspect = width as f64 / height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > aspect {
            // Terminal is wider - fit to height
            ((term_height * aspect) as u16, (term_height / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            (term_width as u16, (term_width / aspect / 2.0) as u16)
        };
        if display_width == 0 || display_height == 0 {
            return;
        }

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = width as f64 / display_width as f64;
        let y_scale = height as f64 / (display_height * 2) as f64;

        // Upper half (▀) colored with fg, lower half with bg
        for ty in 0..display_height {
            for tx in 0..display_width {
                let src_x = (tx as f64 * x_scale) as u32;
                let src_x = if self.mirrored {
                    width.saturating_sub(1).saturating_sub(src_x)
                } else {
                    src_x
                };
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let (r, g, b) = self.source.pixel_rgb(src_x, src_y_top);
                let top = Color::Rgb(r, g, b);
                let (r, g, b) = self.source.pixel_rgb(src_x, src_y_bottom);
                let bottom = Color::Rgb(r, g, b);

                if let Some(cell) = buf.cell_mut((x_offset + tx, y_offset + ty)) {
                    cell.set_char('▀');
                    cell.set_fg(top);
                    cell.set_bg(bottom);
                }
            }
        }
    }
}

/// Preview region
struct ViewfinderWidget<'a> {
    viewfinder: &'a Viewfinder,
}

impl Widget for ViewfinderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = match &self.viewfinder.content {
            ViewfinderContent::Live { frame, mirrored } => {
                PixelWidget {
                    source: &**frame,
                    mirrored: *mirrored,
                }
                .render(area, buf);
                return;
            }
            ViewfinderContent::Waiting => "Waiting for camera...".to_string(),
            ViewfinderContent::Paused => "Preview paused".to_string(),
            ViewfinderContent::Unavailable(reason) => format!("Camera unavailable: {}", reason),
        };
        CenteredText { text: &message }.render(area, buf);
    }
}

/// Blend a color under a black overlay of the given opacity
fn darken(color: Color, opacity: f32) -> Color {
    let keep = (1.0 - opacity).clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * keep) as u8,
            (g as f32 * keep) as u8,
            (b as f32 * keep) as u8,
        ),
        _ => Color::Black,
    }
}

/// Translucent bar drawn over whatever is already in the buffer
struct ChromeBarWidget<'a> {
    bar: ChromeBar,
    title: &'a str,
}

impl Widget for ChromeBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    let fg = darken(cell.fg, self.bar.opacity);
                    let bg = darken(cell.bg, self.bar.opacity);
                    cell.set_fg(fg);
                    cell.set_bg(bg);
                }
            }
        }
        if !self.title.is_empty() && area.height > 0 {
            Paragraph::new(self.title)
                .style(Style::default().fg(Color::White))
                .centered()
                .render(Rect { height: 1, ..area }, buf);
        }
    }
}

/// Bottom bar: gallery, shutter, switch
struct BottomBarWidget<'a> {
    bar: &'a BottomBar,
}

impl Widget for BottomBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ChromeBarWidget {
            bar: self.bar.bar,
            title: "",
        }
        .render(area, buf);

        let gap = (self.bar.spacing / POINTS_PER_COLUMN) as u16;
        let slots: [Rect; 3] = Layout::horizontal([Constraint::Length(CONTROL_SLOT_WIDTH); 3])
            .flex(Flex::Center)
            .spacing(gap)
            .areas(area);
        let controls = [&self.bar.gallery, &self.bar.shutter, &self.bar.switch_camera];
        for (control, slot) in controls.into_iter().zip(slots) {
            ControlWidget { control }.render(slot, buf);
        }
    }
}

struct ControlWidget<'a> {
    control: &'a Control,
}

impl Widget for ControlWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = if self.control.enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        // Label on the last row when there is room for it
        let (icon_area, label_area) = if area.height >= 2 {
            let [icon, label] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
            (icon, Some(label))
        } else {
            (area, None)
        };

        match &self.control.icon {
            Icon::Thumbnail(thumbnail) => PixelWidget {
                source: thumbnail,
                mirrored: false,
            }
            .render(icon_area, buf),
            Icon::Symbol { name, .. } => {
                render_centered(symbol_glyph(name), style, icon_area, buf);
            }
            Icon::ShutterRing { .. } => render_centered("( ● )", style, icon_area, buf),
        }

        if let Some(label_area) = label_area {
            render_centered(self.control.label, style, label_area, buf);
        }
    }
}

fn symbol_glyph(name: &str) -> &'static str {
    match name {
        ui::SWITCH_ICON => "⟲",
        ui::GALLERY_PLACEHOLDER_ICON => "▣",
        _ => "?",
    }
}

fn render_centered(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height / 2;
    buf.set_stringn(x, y, text, area.width as usize, style);
}

/// Message centered in an area
struct CenteredText<'a> {
    text: &'a str,
}

impl Widget for CenteredText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_centered(self.text, Style::default(), area, buf);
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);

        // Fill background
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        buf.set_stringn(area.x, area.y, self.message, area.width as usize, style);
    }
}
