//! Emoji reactions on issues, comments, and other reactable content.

use octorest_core::{ConfirmPolicy, RepoRef};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::Client;
use crate::descriptor::RequestDescriptor;
use crate::errors::Error;
use crate::pagination::Paginator;

use super::SimpleUser;

/// The emoji content of a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionContent {
    /// 👍
    #[serde(rename = "+1")]
    ThumbsUp,
    /// 👎
    #[serde(rename = "-1")]
    ThumbsDown,
    /// 😄
    #[serde(rename = "laugh")]
    Laugh,
    /// 😕
    #[serde(rename = "confused")]
    Confused,
    /// ❤️
    #[serde(rename = "heart")]
    Heart,
    /// 🎉
    #[serde(rename = "hooray")]
    Hooray,
    /// 🚀
    #[serde(rename = "rocket")]
    Rocket,
    /// 👀
    #[serde(rename = "eyes")]
    Eyes,
}

/// A reaction left on reactable content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Reaction id.
    pub id: u64,
    /// Who reacted.
    pub user: Option<SimpleUser>,
    /// Which emoji.
    pub content: ReactionContent,
    /// When the reaction was created.
    pub created_at: Option<String>,
}

/// Reaction service.
#[derive(Debug)]
pub struct Reactions<'a> {
    client: &'a Client,
}

impl Client {
    /// Reaction operations.
    pub fn reactions(&self) -> Reactions<'_> {
        Reactions { client: self }
    }
}

impl Reactions<'_> {
    /// Lazily list reactions on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository reference cannot be resolved.
    pub fn list_for_issue(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Paginator<'_, Reaction>, Error> {
        let desc = RequestDescriptor::get(format!(
            "{}/issues/{number}/reactions",
            repo.resolve()?
        ))
        .query("per_page", self.client.page_size().to_string())
        .build()?;
        Ok(self.client.paginate(desc))
    }

    /// React to an issue. Returns the existing reaction if one already
    /// exists for this user and content.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository reference cannot be resolved or
    /// the call fails.
    pub async fn create_for_issue(
        &self,
        repo: &RepoRef,
        number: u64,
        content: ReactionContent,
    ) -> Result<Reaction, Error> {
        let desc = RequestDescriptor::post(format!(
            "{}/issues/{number}/reactions",
            repo.resolve()?
        ))
        .body(json!({ "content": content }))
        .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Lazily list reactions on an issue comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository reference cannot be resolved.
    pub fn list_for_issue_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
    ) -> Result<Paginator<'_, Reaction>, Error> {
        let desc = RequestDescriptor::get(format!(
            "{}/issues/comments/{comment_id}/reactions",
            repo.resolve()?
        ))
        .query("per_page", self.client.page_size().to_string())
        .build()?;
        Ok(self.client.paginate(desc))
    }

    /// React to an issue comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository reference cannot be resolved or
    /// the call fails.
    pub async fn create_for_issue_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        content: ReactionContent,
    ) -> Result<Reaction, Error> {
        let desc = RequestDescriptor::post(format!(
            "{}/issues/comments/{comment_id}/reactions",
            repo.resolve()?
        ))
        .body(json!({ "content": content }))
        .build()?;
        Ok(self.client.invoke(&desc).await?)
    }

    /// Remove a reaction from an issue. Consults the confirmation policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy denies the removal or the call fails.
    pub async fn delete_for_issue(
        &self,
        repo: &RepoRef,
        number: u64,
        reaction_id: u64,
        confirm: &ConfirmPolicy,
    ) -> Result<(), Error> {
        let path = repo.resolve()?;
        confirm.check(&format!(
            "remove reaction {reaction_id} from issue #{number} in {path}"
        ))?;
        let desc = RequestDescriptor::delete(format!(
            "{path}/issues/{number}/reactions/{reaction_id}"
        ))
        .build()?;
        self.client.invoke_status(&desc).await?;
        Ok(())
    }
}
