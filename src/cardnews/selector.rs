//! Locate the newest card news frame, either within one configured file or
//! across every file a team owns.

use super::{
    error::ScanError,
    frame::{tagged_frames, Frame, TagFilter},
    gather::gather_settled,
};
use crate::figma::{api::FigmaClient, file::DesignFile, team::FileMeta, FigmaError};
use futures::future::try_join_all;
use tracing::{info, warn};

/// Where card news is looked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A single file, filtered on [super::frame::CARD_NEWS_TAG].
    SingleFile { file_key: String },
    /// Every file in every project of a team, filtered on any tag.
    Team { team_id: String },
}

impl Scope {
    pub fn tag_filter(&self) -> TagFilter {
        match self {
            Scope::SingleFile { .. } => TagFilter::CardNews,
            Scope::Team { .. } => TagFilter::AnyTag,
        }
    }
}

/// A frame chosen as the latest, along with the name of the file it was
/// found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Latest {
    pub frame: Frame,
    pub file_name: String,
}

/// A file whose document was fetched during a team scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned {
    pub key: String,
    pub file: DesignFile,
}

/// Every card news frame in a single file, in document order.
pub async fn frames_in_file(figma: &FigmaClient, file_key: &str) -> Result<Vec<Frame>, FigmaError> {
    let file = figma.get_file(file_key).await?;
    Ok(tagged_frames(&file, file_key, TagFilter::CardNews))
}

/// The last tagged frame in document order, taken to be the newest.
pub fn last_frame(scanned: &Scanned, filter: TagFilter) -> Option<Latest> {
    tagged_frames(&scanned.file, &scanned.key, filter)
        .pop()
        .map(|frame| Latest {
            frame,
            file_name: scanned.file.name.to_owned(),
        })
}

/// Find the latest frame within the given scope. `Ok(None)` means the search
/// worked but nothing was tagged.
pub async fn find_latest(figma: &FigmaClient, scope: &Scope) -> Result<Option<Latest>, ScanError> {
    let scanned = match scope {
        Scope::SingleFile { file_key } => Scanned {
            key: file_key.to_owned(),
            file: figma.get_file(file_key).await?,
        },
        Scope::Team { team_id } => scan_team(figma, team_id).await?,
    };

    Ok(last_frame(&scanned, scope.tag_filter()))
}

/// Fetch every file a team owns and return the most recently modified one.
///
/// Files whose documents fail to fetch are skipped. Failing to list the
/// team's projects or files is fatal however, as is every fetch failing.
pub async fn scan_team(figma: &FigmaClient, team_id: &str) -> Result<Scanned, ScanError> {
    let projects = figma.list_projects(team_id).await?;

    let metas: Vec<FileMeta> = try_join_all(projects.iter().map(|p| figma.list_files(p.id)))
        .await?
        .into_iter()
        .flatten()
        .collect();

    let names: Vec<&str> = projects.iter().map(|p| &p.name[..]).collect();
    info!(
        "Scanning {} Figma files across {} projects: {}",
        metas.len(),
        projects.len(),
        names.join(", ")
    );

    let settled = gather_settled(metas.into_iter().map(|meta| async move {
        match figma.get_file(&meta.key).await {
            Ok(file) => Ok(Scanned {
                key: meta.key,
                file,
            }),
            Err(e) => Err((meta, e)),
        }
    }))
    .await;

    for (meta, e) in &settled.failures {
        warn!("Skipping Figma file {} ({}): {}", meta.name, meta.key, e);
    }

    if settled.is_partial() {
        warn!(
            "Continuing with {} of {} Figma files",
            settled.successes.len(),
            settled.successes.len() + settled.failures.len()
        );
    }

    most_recent(settled.successes).ok_or(ScanError::NothingScannable)
}

/// The file with the latest modification time.
pub fn most_recent(xs: Vec<Scanned>) -> Option<Scanned> {
    xs.into_iter().max_by_key(|x| x.file.last_modified)
}
