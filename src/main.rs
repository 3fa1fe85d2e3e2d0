//! Headless host: load an image, replay a JSON script of editor input,
//! and write the annotated PNG.
//!
//! ```text
//! snapedit <image> <script.json> [out.png]
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use snapedit::capture::crop;
use snapedit::capture::export;
use snapedit::capture::image::SourceImage;
use snapedit::config::SnapEditConfig;
use snapedit::domain::{Point, Tool};
use snapedit::render::viewport::DisplayBox;
use snapedit::session::messages::{CropMsg, ImageMsg, PointerMsg, TextMsg, ToolMsg, ViewMsg};
use snapedit::session::shortcuts::{Key, Modifiers, Named};
use snapedit::{Effect, Msg, Notice, NoticeKind, Session};

/// One scripted input, in screen coordinates
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ScriptStep {
    Tool { tool: Tool },
    Color { index: usize },
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Leave,
    /// Click with the text tool and answer the entry with `value`
    Text { x: f32, y: f32, value: String },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    Undo,
    Delete,
    ClearAll,
    ConfirmCrop,
    CancelCrop,
    Resize { display: DisplayBox },
    Download,
    Copy,
}

impl ScriptStep {
    fn key(name: &str) -> Key {
        match name {
            "Escape" => Key::Named(Named::Escape),
            "Delete" => Key::Named(Named::Delete),
            "Backspace" => Key::Named(Named::Backspace),
            "Enter" => Key::Named(Named::Enter),
            other => Key::Character(other.to_string()),
        }
    }
}

struct Host {
    output: Option<PathBuf>,
    /// Answer for the next text entry request
    pending_text: Option<String>,
}

impl Host {
    async fn step(&mut self, session: &mut Session, step: ScriptStep) -> anyhow::Result<()> {
        log::debug!("Script step: {:?}", step);
        let effect = match step {
            ScriptStep::Tool { tool } => session.update(Msg::tool(tool)),
            ScriptStep::Color { index } => session.update(Msg::Tool(ToolMsg::SetColor(index))),
            ScriptStep::Down { x, y } => session.update(Msg::pointer_down(x, y)),
            ScriptStep::Move { x, y } => session.update(Msg::pointer_move(x, y)),
            ScriptStep::Up { x, y } => session.update(Msg::pointer_up(x, y)),
            ScriptStep::Leave => session.update(Msg::Pointer(PointerMsg::Leave)),
            ScriptStep::Text { x, y, value } => {
                self.pending_text = Some(value);
                session.update(Msg::Pointer(PointerMsg::Down(Point::new(x, y))))
            }
            ScriptStep::Key { key, ctrl, shift } => session.key_event(
                &ScriptStep::key(&key),
                Modifiers {
                    control: ctrl,
                    shift,
                },
            ),
            ScriptStep::Undo => session.update(Msg::undo()),
            ScriptStep::Delete => session.update(Msg::delete_selected()),
            ScriptStep::ClearAll => session.update(Msg::clear_all()),
            ScriptStep::ConfirmCrop => session.update(Msg::confirm_crop()),
            ScriptStep::CancelCrop => session.update(Msg::cancel_crop()),
            ScriptStep::Resize { display } => session.update(Msg::View(ViewMsg::Resized(display))),
            ScriptStep::Download => session.update(Msg::download()),
            ScriptStep::Copy => session.update(Msg::copy_to_clipboard()),
        };
        self.run(session, effect).await
    }

    /// Carry out effects until the session has nothing more to ask
    async fn run(&mut self, session: &mut Session, mut effect: Effect) -> anyhow::Result<()> {
        loop {
            let next = match effect {
                Effect::None => return Ok(()),
                Effect::Notify(notice) => {
                    report(&notice);
                    return Ok(());
                }
                Effect::RequestText { at, .. } => match self.pending_text.take() {
                    Some(text) => {
                        log::debug!("Text entry at {:?}: {:?}", at, text);
                        Msg::Text(TextMsg::Confirm(text))
                    }
                    None => Msg::Text(TextMsg::Cancel),
                },
                Effect::ExtractCrop { source, rect } => {
                    Msg::Crop(CropMsg::Extracted(crop::extract(source, rect).await))
                }
                Effect::DecodeImage(bytes) => {
                    Msg::Image(ImageMsg::Decoded(SourceImage::decode_async(bytes).await))
                }
                Effect::Download { file_name, png } => {
                    let path = self
                        .output
                        .clone()
                        .unwrap_or_else(|| export::download_dir().join(file_name));
                    export::save_png(&png, &path)?;
                    println!("Saved {}", path.display());
                    return Ok(());
                }
                Effect::CopyToClipboard { png } => {
                    log::warn!("No clipboard in headless mode, dropped {} bytes", png.len());
                    return Ok(());
                }
                Effect::PersistConfig(config) => {
                    config.save();
                    return Ok(());
                }
            };
            effect = session.update(next);
        }
    }
}

fn report(notice: &Notice) {
    let description = notice.description.as_deref().unwrap_or("");
    match notice.kind {
        NoticeKind::Error => log::warn!("{}: {}", notice.title, description),
        NoticeKind::Info | NoticeKind::Success => {
            log::info!("{}: {}", notice.title, description)
        }
    }
}

fn read_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).context("Malformed script")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let (Some(image_path), Some(script_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: snapedit <image> <script.json> [out.png]");
    };
    let mut host = Host {
        output: args.next(),
        pending_text: None,
    };

    let steps = read_script(&script_path)?;
    let image = SourceImage::open(&image_path)?;

    let mut session = Session::new(SnapEditConfig::load());
    if session.needs_intro() {
        log::info!("Capture or drop an image, annotate it, then download or copy the result");
        let effect = session.update(Msg::DismissIntro);
        host.run(&mut session, effect).await?;
    }

    let effect = session.update(Msg::Image(ImageMsg::Captured(Ok(image))));
    host.run(&mut session, effect).await?;

    for step in steps {
        host.step(&mut session, step).await?;
    }

    let effect = session.update(Msg::download());
    host.run(&mut session, effect).await
}
