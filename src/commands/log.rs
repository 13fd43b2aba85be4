use crate::ColorChoice;
use crate::areas::output::stdout_is_terminal;
use crate::areas::repository::Repository;
use crate::artifacts::graph::render::{RenderOptions, render_graph};
use crate::commands::HistoryOptions;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub history: HistoryOptions,
    pub color: ColorChoice,
}

impl Repository {
    pub async fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        let layout = self.load_layout(&opts.history).await?;

        let color = match opts.color {
            ColorChoice::Auto => stdout_is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        colored::control::set_override(color);

        let mut writer = self.writer();
        for line in render_graph(&layout, &RenderOptions::new(color)) {
            writeln!(writer, "{line}")?;
        }

        Ok(())
    }
}
