//! Discover every file a team owns, by way of its projects.
//!
//! <https://www.figma.com/developers/api#projects-endpoints>

use super::{api::*, FigmaError};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Documented as a string but numeric in practice, and older responses
    /// carried it as a number.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: u64,
    pub name: String,
}

/// A file's listing within a project. Its full document isn't included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileMeta {
    pub key: String,
    pub name: String,
}

#[derive(Deserialize)]
struct ProjectsResponse {
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct FilesResponse {
    files: Vec<FileMeta>,
}

impl FigmaClient {
    /// List the projects of a team visible to our token.
    pub async fn list_projects(&self, team_id: &str) -> Result<Vec<Project>, FigmaError> {
        let res: ProjectsResponse = fetch(self.get(format!("/teams/{}/projects", team_id))).await?;
        Ok(res.projects)
    }

    /// List the files within a project.
    pub async fn list_files(&self, project_id: u64) -> Result<Vec<FileMeta>, FigmaError> {
        let res: FilesResponse = fetch(self.get(format!("/projects/{}/files", project_id))).await?;
        Ok(res.files)
    }
}
