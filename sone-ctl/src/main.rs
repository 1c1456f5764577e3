use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sone_client::{
    api::{FormPassword, SoneId, Target},
    Backend, HttpBackend, PollConfig, Poller, Sleeper, SoneView, StatusView, WatchRegistry,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Url of the web interface, eg. http://localhost:8888/Sone/
    #[structopt(short, long)]
    host: url::Url,

    /// Form password of a logged-in page, defaults to the SONE_FORM_PASSWORD
    /// environment variable
    #[structopt(long)]
    form_password: Option<String>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
struct TargetOpt {
    /// Designate a reply rather than a post
    #[structopt(long)]
    reply: bool,

    /// Id of the post or reply
    id: String,
}

impl TargetOpt {
    fn target(self) -> Target {
        match self.reply {
            true => Target::reply(self.id),
            false => Target::post(self.id),
        }
    }
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Print the current status of a sone
    Status { sone: String },

    /// Keep printing the status of sones as it changes
    Watch { sones: Vec<String> },

    /// Translate a l10n key
    Translate { key: String },

    /// Like a post or reply
    Like(TargetOpt),

    /// Unlike a post or reply
    Unlike(TargetOpt),

    /// Print the like count of a post or reply
    Likes(TargetOpt),

    /// Delete a post or reply
    Delete(TargetOpt),
}

struct TokioSleeper;

#[async_trait(?Send)]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, d: Duration) {
        tokio::time::sleep(d).await
    }
}

struct Terminal;

impl StatusView for Terminal {
    fn render_sone(&self, view: &SoneView) {
        let modified = match view.modified {
            true => " (modified)",
            false => "",
        };
        println!(
            "{} [{}] {}: {}{modified}",
            view.id, view.status, view.name, view.last_updated
        );
    }
}

fn form_password(opt: Option<String>) -> anyhow::Result<FormPassword> {
    let pass = match opt {
        Some(pass) => pass,
        None => std::env::var("SONE_FORM_PASSWORD")
            .context("retrieving SONE_FORM_PASSWORD environment variable")?,
    };
    Ok(FormPassword(pass))
}

/// Sones to poll, each once however many times it was given
fn sones_to_watch(registry: &WatchRegistry, sones: Vec<String>) -> Vec<SoneId> {
    sones
        .into_iter()
        .map(SoneId)
        .filter(|s| registry.register(s))
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = <Opt as structopt::StructOpt>::from_args();

    tracing::debug!(host = %opt.host, "using web interface");
    let backend = HttpBackend::new(opt.host);

    match opt.cmd {
        Command::Status { sone } => {
            let status = backend.get_sone_status(&SoneId(sone.clone())).await?;
            let mut view = SoneView::new(SoneId(sone));
            view.apply(status);
            Terminal.render_sone(&view);
        }
        Command::Watch { sones } => {
            let config = PollConfig {
                initial_delay: Duration::ZERO,
                ..PollConfig::default()
            };
            let sones = sones_to_watch(&WatchRegistry::new(), sones);
            tracing::debug!(?sones, "watching");
            let poller = Poller::new(&backend, &Terminal, &TokioSleeper, &config);
            futures::future::join_all(sones.into_iter().map(|s| poller.run(s))).await;
        }
        Command::Translate { key } => {
            println!("{}", backend.get_translation(&key).await?);
        }
        Command::Like(t) => {
            let pass = form_password(opt.form_password)?;
            let target = t.target();
            backend.like(&target, &pass).await?;
            tracing::debug!(%target, "liked");
        }
        Command::Unlike(t) => {
            let pass = form_password(opt.form_password)?;
            let target = t.target();
            backend.unlike(&target, &pass).await?;
            tracing::debug!(%target, "unliked");
        }
        Command::Likes(t) => {
            let target = t.target();
            match backend.get_likes(&target).await?.likes() {
                Some(n) => println!("{n}"),
                None => anyhow::bail!("server failed counting likes of {target}"),
            }
        }
        Command::Delete(t) => {
            let pass = form_password(opt.form_password)?;
            let target = t.target();
            backend
                .delete(&target, &pass)
                .await?
                .into_result(target.kind())
                .map_err(|e| anyhow::anyhow!(e.message()))?;
            tracing::debug!(%target, "deleted");
        }
    }

    Ok(())
}
