use crate::message::EntityId;
use crate::record::{Record, ReplyState};
use crate::user::Role;

pub const PERMISSION_DENIED_NOTICE: &str = "您沒有權限查看此區域 (僅限專業人員)";
pub const EMPTY_RECORDS_NOTICE: &str = "目前還沒有治療紀錄";
pub const LOAD_FAILED_NOTICE: &str = "載入失敗";
pub const WAITING_NOTICE: &str = "等待老師回覆...";

/// Reply area under a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBlock {
    Reply(String),
    /// "reply to this record" action, teacher only
    ReplyAction,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordItem {
    pub id: EntityId,
    pub title: String,
    pub therapist_name: String,
    pub content: String,
    pub reply: ReplyBlock,
}

impl RecordItem {
    pub fn render(record: &Record, viewer: Role) -> Self {
        let reply = match record.reply_state(viewer) {
            ReplyState::Replied(text) => ReplyBlock::Reply(text.to_string()),
            ReplyState::CanReply => ReplyBlock::ReplyAction,
            ReplyState::Waiting => ReplyBlock::Waiting,
        };
        Self {
            id: record.id.clone(),
            title: format!("{} 治療紀錄", record.date),
            therapist_name: record.therapist_name.clone(),
            content: record.content.clone(),
            reply,
        }
    }
}

/// Content of the record list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordListView {
    #[default]
    Idle,
    Loading,
    PermissionDenied,
    Empty,
    Failed,
    Items(Vec<RecordItem>),
}

impl RecordListView {
    pub fn from_records(records: &[Record], viewer: Role) -> Self {
        if records.is_empty() {
            return RecordListView::Empty;
        }
        RecordListView::Items(
            records
                .iter()
                .map(|rec| RecordItem::render(rec, viewer))
                .collect(),
        )
    }

    /// Notice text for the non-item states.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            RecordListView::PermissionDenied => Some(PERMISSION_DENIED_NOTICE),
            RecordListView::Empty => Some(EMPTY_RECORDS_NOTICE),
            RecordListView::Failed => Some(LOAD_FAILED_NOTICE),
            RecordListView::Idle | RecordListView::Loading | RecordListView::Items(_) => None,
        }
    }

    pub fn items(&self) -> &[RecordItem] {
        match self {
            RecordListView::Items(items) => items,
            _ => &[],
        }
    }

    pub fn find(&self, id: &EntityId) -> Option<&RecordItem> {
        self.items().iter().find(|item| item.id.same_as(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, reply: Option<&str>) -> Record {
        Record {
            id: EntityId::Number(id),
            date: "2024-05-01".to_string(),
            content: "content".to_string(),
            therapist_name: "Chen".to_string(),
            teacher_reply: reply.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_list_renders_empty_notice() {
        let view = RecordListView::from_records(&[], Role::Teacher);
        assert_eq!(view, RecordListView::Empty);
        assert_eq!(view.notice(), Some(EMPTY_RECORDS_NOTICE));
    }

    #[test]
    fn test_items_carry_reply_blocks() {
        let records = vec![record(1, Some("X")), record(2, None)];
        let view = RecordListView::from_records(&records, Role::Teacher);
        let items = view.items();
        assert_eq!(items[0].reply, ReplyBlock::Reply("X".to_string()));
        assert_eq!(items[0].title, "2024-05-01 治療紀錄");
        assert_eq!(items[1].reply, ReplyBlock::ReplyAction);

        let view = RecordListView::from_records(&records, Role::Parents);
        assert_eq!(view.items()[1].reply, ReplyBlock::Waiting);
        assert_eq!(view.notice(), None);
    }

    #[test]
    fn test_find_accepts_numeric_form_of_text_id() {
        let mut rec = record(1, None);
        rec.id = EntityId::Text("5".to_string());
        let view = RecordListView::from_records(&[rec], Role::Teacher);
        assert!(view.find(&EntityId::from("5")).is_some());
        assert!(view.find(&EntityId::Number(1)).is_none());
    }
}
