mod game;
mod input;
mod render;
mod time;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use game::{actions, save, CaseClicker};
use input::{ClickState, InputEvent};
use time::{TickClock, TICKS_PER_SEC};

/// Query the grid container's bounding rect and convert pixel coordinates
/// into a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    input::pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    )
}

/// Feed one event to the engine and persist if it mutated anything.
fn dispatch(game: &Rc<RefCell<CaseClicker>>, event: InputEvent) {
    let mut g = game.borrow_mut();
    if g.handle_input(&event) {
        save::save_game(&g.state);
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(CaseClicker::new()));
    {
        let mut g = game.borrow_mut();
        if save::load_game(&mut g.state) {
            g.state.add_log("Progress restored.", false);
        }
    }

    let clock = Rc::new(RefCell::new(TickClock::new(TICKS_PER_SEC)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Mouse/touch handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let (col, row) = (mouse_event.col, mouse_event.row);
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(id) = action {
                dispatch(&game, InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| match key_event.code {
            KeyCode::Enter | KeyCode::Esc => {
                dispatch(&game, InputEvent::Click(actions::CLOSE_NOTICE));
            }
            KeyCode::Char(c) => {
                dispatch(&game, InputEvent::Key(c.to_ascii_lowercase()));
            }
            _ => {}
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            // Advance game time before drawing this frame.
            {
                let ticks = clock.borrow_mut().update(js_sys::Date::now());
                let mut g = game.borrow_mut();
                if g.tick(ticks) {
                    save::save_game(&g.state);
                }
            }

            let g = game.borrow();
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            render::render(&g.state, f, size, &click_state);
        }
    });

    Ok(())
}
