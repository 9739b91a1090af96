use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use mystery_exe::{RoomCatalog, RoomView};

use crate::app::{App, ClueImage, GameState, MenuOption};

pub fn draw_ui(f: &mut Frame, app: &App, catalog: &RoomCatalog) {
    match app.state {
        GameState::TitleScreen => draw_title_screen(f, app),
        GameState::Terminal => draw_terminal(f, app, catalog),
        GameState::InRoom => match app.room {
            Some(view) => draw_room(f, app, &view, catalog),
            None => draw_terminal(f, app, catalog),
        },
    }
}

fn status_bar<'a>(app: &App, location: String) -> Paragraph<'a> {
    let progress = app.tracker.completion_percentage();
    let status = Line::from(vec![
        Span::styled(
            " MYSTERY.EXE ",
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", location),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Explored: {}% ", progress),
            Style::default().fg(if progress >= 100 {
                Color::Yellow
            } else {
                Color::Cyan
            }),
        ),
    ]);
    Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM))
}

fn message_panel<'a>(app: &App) -> Paragraph<'a> {
    let (content, style, title) = if app.command_mode {
        (
            format!(":{}", app.command_buffer),
            Style::default().fg(Color::White).bg(Color::DarkGray),
            " Command ",
        )
    } else {
        (app.message.clone(), app.message_style, " System ")
    };
    Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .style(style)
}

fn history_panel<'a>(app: &App, catalog: &RoomCatalog) -> Paragraph<'a> {
    let lines: Vec<Line> = if app.tracker.visit_history().is_empty() {
        vec![Line::from(Span::styled(
            "No rooms visited yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.tracker
            .visit_history()
            .iter()
            .map(|code| {
                let name = catalog
                    .room_by_code(code)
                    .map(|r| r.name.clone())
                    .unwrap_or_default();
                Line::from(vec![
                    Span::styled(format!("{:<9}", code), Style::default().fg(Color::Yellow)),
                    Span::raw(name),
                ])
            })
            .collect()
    };
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Visited {} ", app.tracker.visited_count())),
    )
}

fn draw_terminal(f: &mut Frame, app: &App, catalog: &RoomCatalog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(5),
        ])
        .split(f.area());

    f.render_widget(status_bar(app, "MAINFRAME".to_string()), chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if app.show_history {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(chunks[1]);

    let help = vec![
        Line::from(Span::styled(
            "ACCESS TERMINAL",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Passcode format: <level><department><room>"),
        Line::from("  Levels 1-2: three digit room number, e.g. 1EC210"),
        Line::from("  Level 3:    two digit room number, e.g. 3FINAL01"),
        Line::from(""),
        Line::from(Span::styled(
            "Each room holds the clue to the next passcode.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let help = Paragraph::new(help)
        .block(Block::default().borders(Borders::ALL).title(" Mainframe "))
        .wrap(Wrap { trim: false });
    f.render_widget(help, body[0]);
    if app.show_history {
        f.render_widget(history_panel(app, catalog), body[1]);
    }

    f.render_widget(&app.input, chunks[2]);
    f.render_widget(message_panel(app), chunks[3]);
}

fn draw_room(f: &mut Frame, app: &App, view: &RoomView, catalog: &RoomCatalog) {
    let room = view.room;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(f.area());

    f.render_widget(
        status_bar(app, format!("ROOM {} | LEVEL {}", room.label(), room.level)),
        chunks[0],
    );

    let header = vec![
        Line::from(Span::styled(
            room.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(room.clearance.clone(), Style::default().fg(Color::Red)),
            Span::raw(" | "),
            Span::raw(room.description.clone()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    draw_clue_image(f, app, view, main[0]);
    if app.show_history {
        f.render_widget(history_panel(app, catalog), main[1]);
    } else {
        draw_clue_analysis(f, view, main[1]);
    }

    let crumbs = view.breadcrumbs().join(" > ");
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(crumbs, Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(
            format!("$ status --room: {}", room.status),
            Style::default().fg(Color::Cyan),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(
        " [ENTER: Follow clue | h: History | Esc: Mainframe | :q Quit] ",
    ));
    f.render_widget(footer, chunks[3]);

    f.render_widget(message_panel(app), chunks[4]);
}

fn draw_clue_image(f: &mut Frame, app: &App, view: &RoomView, area: Rect) {
    let lines = match &app.clue {
        Some(ClueImage::Available(path)) => vec![
            Line::from(Span::styled(
                "STATUS: IMAGE LOADED",
                Style::default().fg(Color::Green),
            )),
            Line::from(""),
            Line::from(format!("Open {} to study the clue.", path.display())),
        ],
        Some(ClueImage::Unavailable(path)) => vec![
            Line::from(Span::styled(
                "IMAGE NOT FOUND",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(view.room.name.clone()),
            Line::from(Span::styled(
                format!("Expected: {}", path.display()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "STATUS: IMAGE UNAVAILABLE",
                Style::default().fg(Color::Red),
            )),
        ],
        None => vec![Line::from("LOADING CLUE IMAGE...")],
    };
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Clue Image "))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

fn draw_clue_analysis(f: &mut Frame, view: &RoomView, area: Rect) {
    let mut lines = Vec::new();

    if view.is_final {
        lines.push(Line::from(Span::styled(
            "FINAL DESTINATION REACHED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(view.room.name.clone()));
        lines.push(Line::from(Span::styled(
            view.room.description.clone(),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("CLEARANCE: {}", view.room.clearance),
            Style::default().fg(Color::Red),
        )));
    } else {
        if let (true, Some(next)) = (view.shows_next_passcode(), view.next_room) {
            lines.push(Line::from(Span::styled(
                "NEXT PASSCODE TO ENTER",
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::from(Span::styled(
                next.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        match (view.hint(), view.next_room_record()) {
            (Some(hint), Some(next)) => {
                lines.push(Line::from(Span::styled(
                    "CLUE DESTINATION",
                    Style::default().fg(Color::Cyan),
                )));
                lines.push(Line::from(format!(
                    "{} - Level {}: {}",
                    next.label(),
                    next.level,
                    next.name
                )));
                lines.push(Line::from(Span::styled(
                    next.description.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "NAVIGATION HINT",
                    Style::default().fg(Color::Cyan),
                )));
                lines.push(Line::from(Span::styled(
                    format!("\"{}\"", hint),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            _ => {
                lines.push(Line::from(Span::styled(
                    "NO CLUE MAPPING FOUND",
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Clue Analysis "))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

fn draw_title_screen(f: &mut Frame, app: &App) {
    let area = f.area();

    let title_art = r#"
    ╔═══════════════════════════════════════════════════════════╗
    ║                                                           ║
    ║   ███╗   ███╗██╗   ██╗███████╗████████╗███████╗██████╗    ║
    ║   ████╗ ████║╚██╗ ██╔╝██╔════╝╚══██╔══╝██╔════╝██╔══██╗   ║
    ║   ██╔████╔██║ ╚████╔╝ ███████╗   ██║   █████╗  ██████╔╝   ║
    ║   ██║╚██╔╝██║  ╚██╔╝  ╚════██║   ██║   ██╔══╝  ██╔══██╗   ║
    ║   ██║ ╚═╝ ██║   ██║   ███████║   ██║   ███████╗██║  ██║   ║
    ║   ╚═╝     ╚═╝   ╚═╝   ╚══════╝   ╚═╝   ╚══════╝╚═╝  ╚═╝   ║
    ║                                                           ║
    ║                         .EXE                              ║
    ║                                                           ║
    ║            "Every room hides the next passcode"           ║
    ║                                                           ║
    ╚═══════════════════════════════════════════════════════════╝
"#;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(17),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let new_game_style = if matches!(app.menu_selection, MenuOption::NewGame) {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let new_game = Paragraph::new("  NEW GAME  ")
        .style(new_game_style)
        .alignment(Alignment::Center);
    f.render_widget(new_game, chunks[1]);

    let quit_style = if matches!(app.menu_selection, MenuOption::Quit) {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let quit = Paragraph::new("  QUIT  ")
        .style(quit_style)
        .alignment(Alignment::Center);
    f.render_widget(quit, chunks[2]);

    let help = Paragraph::new("↑/↓ to select  •  ENTER to confirm  •  q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}
