use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::datasets::{DatasetKey, RawDataset};

pub const DEFAULT_RECENT_LIMIT: usize = 15;

#[derive(Debug, Serialize)]
pub struct AnalysisMetrics {
    pub total_followers: usize,
    pub total_following: usize,
    pub unfollowed_count: usize,
    pub not_following_back_count: usize,
    pub mutual_following_count: usize,
    pub you_not_following_count: usize,
    pub blocked_count: usize,
    pub hide_story_count: usize,
    pub accepted_requests_count: usize,
    pub received_requests_count: usize,
    pub pending_requests_count: usize,
    pub restricted_profiles_count: usize,
    pub recent_followers_count: usize,
}

/// Username lists backing each metric. Alphabetical order throughout,
/// except `recent_followers_list` which keeps the export's recency order.
#[derive(Debug, Serialize)]
pub struct UserLists {
    pub not_following_back_list: Vec<String>,
    pub mutual_following_list: Vec<String>,
    pub you_not_following_list: Vec<String>,
    pub unfollowed_list: Vec<String>,
    pub blocked_list: Vec<String>,
    pub hide_story_list: Vec<String>,
    pub accepted_requests_list: Vec<String>,
    pub received_requests_list: Vec<String>,
    pub pending_requests_list: Vec<String>,
    pub restricted_profiles_list: Vec<String>,
    pub recent_followers_list: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub metrics: AnalysisMetrics,
    pub user_lists: UserLists,
}

/// Loads all nine datasets from the extraction root and computes the
/// relationship metrics. Datasets that are missing or unreadable count as
/// empty; only a missing extraction root is fatal.
pub fn analyze_extracted(extraction_root: &Path, recent_limit: usize) -> Result<AnalysisResult> {
    if !extraction_root.is_dir() {
        anyhow::bail!("extraction root not found at {:?}", extraction_root);
    }

    let data = RawDataset::load(extraction_root);

    let followers = data.usernames(DatasetKey::Followers);
    let following = data.usernames(DatasetKey::Following);
    let blocked = data.usernames(DatasetKey::Blocked);
    let unfollowed = data.usernames(DatasetKey::RecentlyUnfollowed);
    let accepted_requests = data.usernames(DatasetKey::AcceptedRequests);
    let received_requests = data.usernames(DatasetKey::ReceivedRequests);
    let hide_story = data.usernames(DatasetKey::HideStoryFrom);
    let pending_requests = data.usernames(DatasetKey::PendingRequests);
    let restricted = data.usernames(DatasetKey::RestrictedProfiles);

    let mutual_following: BTreeSet<String> =
        followers.intersection(&following).cloned().collect();
    // People the owner follows who do not follow back.
    let not_following_back: BTreeSet<String> =
        following.difference(&followers).cloned().collect();
    // People following the owner whom the owner does not follow back.
    let you_not_following: BTreeSet<String> =
        followers.difference(&following).cloned().collect();

    let mut recent_followers = data.ordered_usernames(DatasetKey::Followers);
    recent_followers.truncate(recent_limit);

    info!(
        action = "complete",
        component = "analysis",
        total_followers = followers.len(),
        total_following = following.len(),
        mutual_following = mutual_following.len(),
        not_following_back = not_following_back.len(),
        "Relationship analysis completed"
    );

    let metrics = AnalysisMetrics {
        total_followers: followers.len(),
        total_following: following.len(),
        unfollowed_count: unfollowed.len(),
        not_following_back_count: not_following_back.len(),
        mutual_following_count: mutual_following.len(),
        you_not_following_count: you_not_following.len(),
        blocked_count: blocked.len(),
        hide_story_count: hide_story.len(),
        accepted_requests_count: accepted_requests.len(),
        received_requests_count: received_requests.len(),
        pending_requests_count: pending_requests.len(),
        restricted_profiles_count: restricted.len(),
        recent_followers_count: recent_followers.len(),
    };

    let user_lists = UserLists {
        not_following_back_list: sorted_list(not_following_back),
        mutual_following_list: sorted_list(mutual_following),
        you_not_following_list: sorted_list(you_not_following),
        unfollowed_list: sorted_list(unfollowed),
        blocked_list: sorted_list(blocked),
        hide_story_list: sorted_list(hide_story),
        accepted_requests_list: sorted_list(accepted_requests),
        received_requests_list: sorted_list(received_requests),
        pending_requests_list: sorted_list(pending_requests),
        restricted_profiles_list: sorted_list(restricted),
        recent_followers_list: recent_followers,
    };

    Ok(AnalysisResult {
        metrics,
        user_lists,
    })
}

fn sorted_list(set: BTreeSet<String>) -> Vec<String> {
    set.into_iter().collect()
}
