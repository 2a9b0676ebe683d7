use crate::{
    BaseCli, RenderOptions,
    common::{CliModeResult, create_editor_buffer, resolve_editor},
    render::Renderer,
};
use anyhow::{Context, Result};
use chrono::Utc;
use iljeong_core::{Config, CreateEventRequest, EventDraft, Iljeong};
use tracing::debug;

pub struct IljeongCli {
    cli: BaseCli,
    renderer: Renderer,
    iljeong: Iljeong,
}

impl IljeongCli {
    pub fn new(cli: BaseCli, mut config: Config) -> Self {
        if let Some(tz) = cli.tz {
            config.time_zone = tz;
        }
        let renderer = Renderer::new(Some(RenderOptions {
            date_format: config.date_format.to_string(),
            use_color: cli.use_color() && !cli.json,
            short_mode: cli.short,
        }));
        let iljeong = Iljeong::with_config(config);
        IljeongCli {
            cli,
            renderer,
            iljeong,
        }
    }

    pub fn run(&self) -> Result<()> {
        if let CliModeResult::Finish = self.write_mode()? {
            return Ok(());
        };

        if let CliModeResult::Finish = self.editor_mode()? {
            return Ok(());
        };

        Ok(())
    }

    pub fn write_mode(&self) -> Result<CliModeResult> {
        if self.cli.text.is_empty() {
            return Ok(CliModeResult::NothingToDo);
        }
        let inline = self.cli.text.join(" ");
        self.handle_sentence(&inline)?;
        Ok(CliModeResult::Finish)
    }

    pub fn editor_mode(&self) -> Result<CliModeResult> {
        if !self.cli.text.is_empty() {
            return self.write_mode();
        }

        let editor = resolve_editor(&self.iljeong.config.editor);
        let input = create_editor_buffer(&editor)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.renderer
                .print_info("No event created, because no text was received.");
            return Ok(CliModeResult::Finish);
        }
        // Multi-line buffers are read as one sentence.
        let inline = trimmed.lines().collect::<Vec<_>>().join(" ");
        self.handle_sentence(&inline)?;
        Ok(CliModeResult::Finish)
    }

    fn handle_sentence(&self, sentence: &str) -> Result<()> {
        let draft = self.draft_for(sentence)?;
        if self.cli.json {
            let request = CreateEventRequest::from_draft(&draft)?;
            let json = serde_json::to_string_pretty(&request).context("serializing request")?;
            println!("{json}");
        } else {
            self.renderer.print_draft(&draft);
        }
        Ok(())
    }

    fn draft_for(&self, sentence: &str) -> Result<EventDraft> {
        let reference = self.cli.at.map(|at| at.with_timezone(&Utc));
        debug!(sentence, ?reference, "extracting");
        let mut draft = self.iljeong.extract(sentence, reference)?;

        if let Some(minutes) = self.cli.duration {
            draft = draft.with_duration(minutes)?;
            draft.validate_range()?;
        }
        Ok(draft)
    }
}
