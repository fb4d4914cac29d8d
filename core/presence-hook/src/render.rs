//! `render`: previews a template against a refresh request on stdin.

use crate::refresh::read_request;
use presence_core::{
    load_config, render_template, ExtensionIconResolver, FileIconResolver, FsFileSizeProbe,
    PresenceConfig, RefreshRequest, TemplateContext,
};
use std::path::PathBuf;

pub fn run(template: &str, config_path: Option<PathBuf>) -> Result<(), String> {
    let request = read_request()?;
    let config = load_config(config_path)?;
    println!("{}", render(template, &request, &config));
    Ok(())
}

fn render(template: &str, request: &RefreshRequest, config: &PresenceConfig) -> String {
    let snapshot = &request.snapshot;
    let icon = snapshot
        .editor
        .document
        .as_ref()
        .map(|doc| ExtensionIconResolver.resolve(doc));

    let probe = FsFileSizeProbe;
    let mut ctx = TemplateContext::new(snapshot, config, &probe);
    if let Some(icon) = icon.as_deref() {
        ctx = ctx.with_language(icon);
    }
    render_template(template, &mut ctx)
}
