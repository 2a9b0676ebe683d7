use super::theme::OneDark;
use iljeong_core::{EventDraft, render::format_draft_block};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%Y-%m-%d (%a)".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_info(&self, message: &str) {
        let md = format!("|-|\n| {message} |\n|-|\n");
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            println!("{}", message);
        }
    }

    pub fn print_draft(&self, draft: &EventDraft) {
        if self.opts.short_mode {
            self.print_draft_line(draft);
            return;
        }
        let md = format_draft_block(draft, &self.opts.date_format);
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            print!("{md}");
        }
    }

    /// `2024-01-11 15:00 치과 @강남역` on one line.
    pub fn print_draft_line(&self, draft: &EventDraft) {
        let mut date = draft.start.format("%Y-%m-%d").to_string();
        let mut time = draft.start.format("%H:%M").to_string();
        let mut title = draft.title.to_string();
        let mut location = draft
            .location
            .as_deref()
            .map(|l| format!(" @{l}"))
            .unwrap_or_default();

        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            time = time.with(Color::Blue).to_string();
            title = title.with(Color::Yellow).to_string();
            location = location.with(Color::Green).to_string();
        }
        println!("{} {} {}{}", date, time, title, location);
    }
}
