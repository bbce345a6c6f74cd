use std::io::Write;
use std::sync::OnceLock;

use arboard::Clipboard;
use astar_grid::config::{Config, Rgb};
use astar_grid::{layout, AnnotationLayer, Brush, Controller, Intent, Response, SearchOutcome, VisualKind};
use macroquad::prelude::*;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {} - {}", record.level(), record.target(), record.args()))
        .init();
}

fn window_conf() -> Conf {
    init_logging();
    let config = config();
    let (width, height) = config.screen_size();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn rgb(color: Rgb) -> Color {
    Color::from_rgba(color.r, color.g, color.b, 255)
}

fn visual_color(kind: VisualKind) -> Color {
    match kind {
        VisualKind::Wall => WHITE,
        VisualKind::NavStart => Color::from_rgba(0, 255, 255, 255),
        VisualKind::NavEnd => Color::from_rgba(0, 139, 139, 255),
        VisualKind::NavPath => ORANGE,
        VisualKind::OpenSet => GREEN,
        VisualKind::ClosedSet => RED,
    }
}

/// Window state around the controller
struct App {
    controller: Controller<AnnotationLayer>,
    tile_size: f32,
    last_message: String,
}

impl App {
    fn new(config: &Config) -> Self {
        App {
            controller: Controller::new(config.grid.cols, config.grid.rows, AnnotationLayer::new()),
            tile_size: config.grid.tile_size,
            last_message: String::new(),
        }
    }

    /// Grid cell under the mouse cursor
    fn hovered_cell(&self) -> (i32, i32) {
        let (mouse_x, mouse_y) = mouse_position();
        (
            (mouse_x / self.tile_size).floor() as i32,
            (mouse_y / self.tile_size).floor() as i32,
        )
    }

    fn handle_input(&mut self) {
        let (x, y) = self.hovered_cell();

        if is_key_pressed(KeyCode::E) {
            self.apply(Intent::Examine { x, y });
        }
        if is_key_pressed(KeyCode::Space) {
            self.apply(Intent::SearchOrReset);
        }
        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }

        if !self.controller.can_modify_grid() || !self.controller.grid().contains(x, y) {
            return;
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            self.apply(Intent::PlaceNavPoint { x, y });
        }
        // Repeated while held
        if is_mouse_button_down(MouseButton::Middle) {
            self.apply(Intent::Paint { x, y, brush: Brush::Floor });
        } else if is_mouse_button_down(MouseButton::Right) {
            self.apply(Intent::Paint { x, y, brush: Brush::Wall });
        }
    }

    fn apply(&mut self, intent: Intent) {
        match self.controller.apply(intent) {
            Ok(Response::Searched(SearchOutcome::Found { path, cost, explored })) => {
                self.last_message =
                    format!("Path: {} tiles, cost {}, {} explored", path.len(), cost, explored);
            }
            Ok(Response::Searched(SearchOutcome::NoPath { explored })) => {
                self.last_message = format!("No valid path exists ({} explored)", explored);
            }
            Ok(Response::Examined(description)) => self.last_message = description,
            Ok(Response::Reset) => self.last_message.clear(),
            Ok(_) => {}
            Err(e) => self.last_message = e.to_string(),
        }
    }

    fn copy_to_clipboard(&mut self) {
        let grid_string = layout::render(self.controller.grid());
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&grid_string) {
                    log::warn!("Failed to copy to clipboard: {}", e);
                } else {
                    log::info!("Grid layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => log::warn!("Failed to access clipboard: {}", e),
        }
    }

    fn draw(&self, config: &Config) {
        clear_background(rgb(config.visual.background));

        let size = self.tile_size;
        for (pos, kind) in self.controller.sink().iter() {
            draw_rectangle(pos.x as f32 * size, pos.y as f32 * size, size, size, visual_color(kind));
        }

        let (width, height) = config.screen_size();
        let line_color = rgb(config.visual.grid_lines);
        for x in 0..=self.controller.grid().cols() {
            let px = x as f32 * size;
            draw_line(px, 0.0, px, height, 1.0, line_color);
        }
        for y in 0..=self.controller.grid().rows() {
            let py = y as f32 * size;
            draw_line(0.0, py, width, py, 1.0, line_color);
        }

        if config.visual.show_help {
            let help = [
                "LMB: start/end  RMB: wall  MMB: floor",
                "Space: search / reset  E: examine  C: copy  Esc: quit",
                self.last_message.as_str(),
            ];
            for (i, line) in help.iter().enumerate() {
                draw_text(line, 8.0, 20.0 + i as f32 * 20.0, 20.0, YELLOW);
            }
        }
    }
}

fn save_action_log(app: &App, config: &Config) {
    if !config.logging.enable_action_log {
        return;
    }
    let action_log = app.controller.action_log();
    action_log.print();
    log::info!("{}", action_log.summary());
    match action_log.save_to_file(&config.logging.action_log_path) {
        Ok(()) => log::info!("Action log saved to {}", config.logging.action_log_path),
        Err(e) => log::warn!("Failed to save action log: {}", e),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    let mut app = App::new(config);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.handle_input();
        app.draw(config);

        next_frame().await
    }

    save_action_log(&app, config);
}
