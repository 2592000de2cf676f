//! The conversations the bot holds. Each posts a placeholder, works out an
//! answer, and edits the placeholder into it.
//!
//! Figma failures become user-facing messages here and never escape. Slack
//! failures do, as there's no way left to tell the user about them.

use super::{
    command::{Command, SELECT_ACTION_ID},
    reply,
};
use crate::{
    cardnews::{
        error::ScanError,
        selector::{find_latest, frames_in_file, Scope},
    },
    router::Deps,
    slack::{
        event::MessageEvent,
        interaction::BlockActions,
        message::{ChannelId, Message},
        SlackError,
    },
};
use chrono::Utc;
use tracing::{error, info, warn};

/// Answer a channel message if it's one of our commands.
pub async fn on_message(deps: &Deps, event: &MessageEvent) {
    if !event.is_from_user() {
        return;
    }

    let res = match Command::parse(&event.text) {
        Some(Command::Latest) => latest(deps, &event.channel).await,
        Some(Command::All) => list(deps, &event.channel).await,
        None => return,
    };

    if let Err(e) = res {
        error!("{}", e);
    }
}

/// Answer a choice made in the card news menu.
pub async fn on_block_actions(deps: &Deps, actions: &BlockActions) {
    let (Some(channel), Some(chosen)) = (&actions.channel, actions.selection(SELECT_ACTION_ID))
    else {
        return;
    };

    if let Err(e) = selected(deps, &channel.id, &chosen.value, &chosen.text.text).await {
        error!("{}", e);
    }
}

/// `!최신`: show the newest card news in full.
pub async fn latest(deps: &Deps, channel: &ChannelId) -> Result<(), SlackError> {
    let at = deps
        .slack_client
        .post_message(channel, &reply::latest_placeholder())
        .await?;

    let msg = latest_reply(deps).await;

    deps.slack_client.update_message(&at, &msg).await
}

async fn latest_reply(deps: &Deps) -> Message {
    let latest = match find_latest(&deps.figma_client, &deps.scope).await {
        Ok(Some(x)) => x,
        Ok(None) => return reply::none_found(&deps.scope),
        Err(ScanError::NothingScannable) => {
            warn!("{}", ScanError::NothingScannable);
            return reply::nothing_scannable();
        }
        Err(e) => {
            error!("{}", e);
            return reply::lookup_failed();
        }
    };

    info!(
        "Latest card news is {} ({}) in {}",
        latest.frame.name, latest.frame.id, latest.frame.file_key
    );

    match deps
        .figma_client
        .render_image(&latest.frame.file_key, &latest.frame.id)
        .await
    {
        Ok(image) => reply::latest_card(&latest, image, &deps.scope, Utc::now()),
        Err(e) => {
            error!("{}", e);
            reply::lookup_failed()
        }
    }
}

/// `!모두`: offer a menu of card news from the configured file.
pub async fn list(deps: &Deps, channel: &ChannelId) -> Result<(), SlackError> {
    let file_key = match &deps.scope {
        Scope::SingleFile { file_key } => file_key,
        Scope::Team { .. } => {
            deps.slack_client
                .post_message(channel, &reply::list_unsupported())
                .await?;
            return Ok(());
        }
    };

    let at = deps
        .slack_client
        .post_message(channel, &reply::list_placeholder())
        .await?;

    let msg = match frames_in_file(&deps.figma_client, file_key).await {
        Ok(frames) if frames.is_empty() => reply::none_found(&deps.scope),
        Ok(frames) => reply::menu(&frames),
        Err(e) => {
            error!("{}", e);
            reply::lookup_failed()
        }
    };

    deps.slack_client.update_message(&at, &msg).await
}

/// A menu option was chosen: show that frame in full.
///
/// Menus are only offered for a single configured file, so the frame is
/// looked up there.
pub async fn selected(
    deps: &Deps,
    channel: &ChannelId,
    frame_id: &str,
    label: &str,
) -> Result<(), SlackError> {
    let Scope::SingleFile { file_key } = &deps.scope else {
        warn!("Ignoring menu selection of {} while scanning a team", frame_id);
        return Ok(());
    };

    let at = deps
        .slack_client
        .post_message(channel, &reply::selection_placeholder())
        .await?;

    let msg = match deps.figma_client.render_image(file_key, frame_id).await {
        Ok(image) => reply::selected_card(file_key, frame_id, label, image, Utc::now()),
        Err(e) => {
            error!("{}", e);
            reply::image_failed()
        }
    };

    deps.slack_client.update_message(&at, &msg).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        figma::{api::FigmaClient, auth::FigmaAccessToken},
        slack::{api::SlackClient, auth::SlackAccessToken},
    };
    use mockito::{Matcher, Mock, ServerGuard};
    use serde_json::json;

    const IMAGE_URL: &str = "https://figma-alpha-api.s3.us-west-2.amazonaws.com/images/xyz";

    /// Both APIs are served by the same mock server; their paths don't clash.
    fn deps(srv: &ServerGuard, scope: Scope) -> Deps {
        Deps {
            slack_client: SlackClient::new(srv.url(), SlackAccessToken("xoxb-test".into())),
            figma_client: FigmaClient::new(srv.url(), FigmaAccessToken("figd_test".into())),
            scope,
            signing_secret: None,
        }
    }

    fn single_file() -> Scope {
        Scope::SingleFile {
            file_key: "abcKEY".into(),
        }
    }

    fn team() -> Scope {
        Scope::Team {
            team_id: "T42".into(),
        }
    }

    fn channel() -> ChannelId {
        ChannelId("C1".into())
    }

    fn file_res(frames: &[(&str, &str)]) -> String {
        let children: Vec<_> = frames
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name, "type": "FRAME" }))
            .collect();

        json!({
            "name": "마케팅 카드뉴스",
            "lastModified": "2024-03-05T09:12:44Z",
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [{ "id": "0:1", "name": "Page 1", "type": "CANVAS", "children": children }]
            }
        })
        .to_string()
    }

    async fn mock_placeholder(srv: &mut ServerGuard, text: &str) -> Mock {
        srv.mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(json!({ "channel": "C1", "text": text })))
            .with_body(r#"{"ok": true, "channel": "C1", "ts": "1.1"}"#)
            .create_async()
            .await
    }

    async fn mock_update(srv: &mut ServerGuard, text: &str) -> Mock {
        srv.mock("POST", "/chat.update")
            .match_body(Matcher::PartialJson(json!({ "channel": "C1", "ts": "1.1", "text": text })))
            .with_body(r#"{"ok": true, "channel": "C1", "ts": "1.1"}"#)
            .create_async()
            .await
    }

    async fn mock_file(srv: &mut ServerGuard, key: &str, body: String) -> Mock {
        srv.mock("GET", format!("/files/{}", key).as_str())
            .match_query(Matcher::Any)
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_image(srv: &mut ServerGuard, key: &str, id: &str) -> Mock {
        srv.mock("GET", format!("/images/{}", key).as_str())
            .match_query(Matcher::UrlEncoded("ids".into(), id.into()))
            .with_body(json!({ "err": null, "images": { id: IMAGE_URL } }).to_string())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_latest_picks_last_frame() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "📈 최신 카드뉴스를 찾고 있어요...").await;
        let file = mock_file(
            &mut srv,
            "abcKEY",
            file_res(&[
                ("1:1", "[카드뉴스] A"),
                ("1:2", "[카드뉴스] B"),
                ("1:3", "[카드뉴스] C"),
            ]),
        )
        .await;
        let image = mock_image(&mut srv, "abcKEY", "1:3").await;
        let update = mock_update(&mut srv, "✨ 최신 카드뉴스: [카드뉴스] C").await;

        latest(&deps(&srv, single_file()), &channel()).await.unwrap();

        placeholder.assert_async().await;
        file.assert_async().await;
        image.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_latest_none_found() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "📈 최신 카드뉴스를 찾고 있어요...").await;
        let file = mock_file(&mut srv, "abcKEY", file_res(&[("1:1", "메모")])).await;
        let image = srv
            .mock("GET", "/images/abcKEY")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let update = mock_update(&mut srv, "😢 '[카드뉴스]'로 시작하는 프레임을 찾을 수 없어요.").await;

        latest(&deps(&srv, single_file()), &channel()).await.unwrap();

        placeholder.assert_async().await;
        file.assert_async().await;
        image.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_latest_remote_error() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "📈 최신 카드뉴스를 찾고 있어요...").await;
        let file = srv
            .mock("GET", "/files/abcKEY")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"status":403,"err":"Invalid token"}"#)
            .create_async()
            .await;
        let update = mock_update(
            &mut srv,
            "❌ 오류가 발생했어요! Figma 파일 키나 토큰을 확인해주세요.",
        )
        .await;

        latest(&deps(&srv, single_file()), &channel()).await.unwrap();

        placeholder.assert_async().await;
        file.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_latest_team_nothing_scannable() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "📈 최신 카드뉴스를 찾고 있어요...").await;
        let projects = srv
            .mock("GET", "/teams/T42/projects")
            .with_body(r#"{"name": "Marketing", "projects": [{"id": "1", "name": "A"}]}"#)
            .create_async()
            .await;
        let files = srv
            .mock("GET", "/projects/1/files")
            .with_body(r#"{"name": "A", "files": [{"key": "k1", "name": "F1"}, {"key": "k2", "name": "F2"}]}"#)
            .create_async()
            .await;
        let fetches = srv
            .mock("GET", Matcher::Regex(r"^/files/k[12]".into()))
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;
        let images = srv
            .mock("GET", Matcher::Regex(r"^/images/".into()))
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let update = mock_update(&mut srv, "😢 검색할 수 있는 Figma 파일이 없어요.").await;

        latest(&deps(&srv, team()), &channel()).await.unwrap();

        placeholder.assert_async().await;
        projects.assert_async().await;
        files.assert_async().await;
        fetches.assert_async().await;
        images.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_offers_menu() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "📚 모든 카드뉴스 목록을 가져오는 중...").await;
        let file = mock_file(
            &mut srv,
            "abcKEY",
            file_res(&[("1:1", "[카드뉴스] A"), ("1:2", "메모")]),
        )
        .await;
        let update = mock_update(&mut srv, "📜 아래 메뉴에서 카드뉴스를 선택해주세요.").await;

        list(&deps(&srv, single_file()), &channel()).await.unwrap();

        placeholder.assert_async().await;
        file.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_none_found() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "📚 모든 카드뉴스 목록을 가져오는 중...").await;
        let file = mock_file(&mut srv, "abcKEY", file_res(&[])).await;
        let update = mock_update(&mut srv, "😢 '[카드뉴스]'로 시작하는 프레임을 찾을 수 없어요.").await;

        list(&deps(&srv, single_file()), &channel()).await.unwrap();

        placeholder.assert_async().await;
        file.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_unsupported_for_team() {
        let mut srv = mockito::Server::new_async().await;

        let guidance = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::Regex("!모두".into()))
            .with_body(r#"{"ok": true, "channel": "C1", "ts": "1.1"}"#)
            .create_async()
            .await;
        let update = srv
            .mock("POST", "/chat.update")
            .expect(0)
            .create_async()
            .await;

        list(&deps(&srv, team()), &channel()).await.unwrap();

        guidance.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_selected_refetches_image() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "🔎 선택한 카드뉴스를 불러오는 중...").await;
        let image = mock_image(&mut srv, "abcKEY", "1:2").await;
        let update = mock_update(&mut srv, "🖼️ 선택한 카드뉴스: 봄 신상품").await;

        selected(&deps(&srv, single_file()), &channel(), "1:2", "봄 신상품")
            .await
            .unwrap();

        placeholder.assert_async().await;
        image.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_selected_image_failure() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = mock_placeholder(&mut srv, "🔎 선택한 카드뉴스를 불러오는 중...").await;
        let image = srv
            .mock("GET", "/images/abcKEY")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let update = mock_update(&mut srv, "❌ 이미지를 가져오는 중 오류가 발생했어요.").await;

        selected(&deps(&srv, single_file()), &channel(), "1:2", "봄 신상품")
            .await
            .unwrap();

        placeholder.assert_async().await;
        image.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_slack_failure_stops_flow() {
        let mut srv = mockito::Server::new_async().await;

        let placeholder = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
            .create_async()
            .await;
        let file = srv
            .mock("GET", "/files/abcKEY")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let res = latest(&deps(&srv, single_file()), &channel()).await;

        placeholder.assert_async().await;
        file.assert_async().await;
        assert!(matches!(res, Err(SlackError::APIResponseError(e)) if e == "channel_not_found"));
    }

    #[tokio::test]
    async fn test_on_message_ignores_bots_and_chatter() {
        let mut srv = mockito::Server::new_async().await;

        let post = srv
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let d = deps(&srv, single_file());

        let from_bot = MessageEvent {
            channel: channel(),
            text: "!최신".into(),
            user: None,
            bot_id: Some("B1".into()),
            subtype: None,
        };
        on_message(&d, &from_bot).await;

        let chatter = MessageEvent {
            channel: channel(),
            text: "안녕하세요".into(),
            user: Some("U1".into()),
            bot_id: None,
            subtype: None,
        };
        on_message(&d, &chatter).await;

        post.assert_async().await;
    }
}
