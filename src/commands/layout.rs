use crate::areas::repository::Repository;
use crate::commands::HistoryOptions;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub history: HistoryOptions,
    pub pretty: bool,
}

impl Repository {
    pub async fn layout(&self, opts: &LayoutOptions) -> anyhow::Result<()> {
        let layout = self.load_layout(&opts.history).await?;

        let json = if opts.pretty {
            serde_json::to_string_pretty(layout.as_ref())?
        } else {
            serde_json::to_string(layout.as_ref())?
        };
        writeln!(self.writer(), "{json}")?;

        Ok(())
    }
}
