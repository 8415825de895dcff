//! Method identifiers and their published tiers.
//!
//! Identifiers are the wire names of the remote API methods. The table below
//! is the static method-to-tier mapping consulted by the tier registry.

#![allow(missing_docs)]

use crate::RateLimitTier;

/// Post a message to a channel. Throttled per channel.
pub const CHAT_POST_MESSAGE: &str = "chat.postMessage";

/// Set the status of an assistant thread. Throttled per channel.
pub const ASSISTANT_THREADS_SET_STATUS: &str = "assistant.threads.setStatus";

// Methods throttled per team.
pub const API_TEST: &str = "api.test";
pub const APPS_UNINSTALL: &str = "apps.uninstall";
pub const ASSISTANT_THREADS_SET_SUGGESTED_PROMPTS: &str = "assistant.threads.setSuggestedPrompts";
pub const ASSISTANT_THREADS_SET_TITLE: &str = "assistant.threads.setTitle";
pub const AUTH_TEST: &str = "auth.test";
pub const BOOKMARKS_ADD: &str = "bookmarks.add";
pub const BOOKMARKS_EDIT: &str = "bookmarks.edit";
pub const BOOKMARKS_LIST: &str = "bookmarks.list";
pub const BOOKMARKS_REMOVE: &str = "bookmarks.remove";
pub const BOTS_INFO: &str = "bots.info";
pub const CHAT_DELETE: &str = "chat.delete";
pub const CHAT_DELETE_SCHEDULED_MESSAGE: &str = "chat.deleteScheduledMessage";
pub const CHAT_GET_PERMALINK: &str = "chat.getPermalink";
pub const CHAT_ME_MESSAGE: &str = "chat.meMessage";
pub const CHAT_POST_EPHEMERAL: &str = "chat.postEphemeral";
pub const CHAT_SCHEDULE_MESSAGE: &str = "chat.scheduleMessage";
pub const CHAT_SCHEDULED_MESSAGES_LIST: &str = "chat.scheduledMessages.list";
pub const CHAT_UNFURL: &str = "chat.unfurl";
pub const CHAT_UPDATE: &str = "chat.update";
pub const CONVERSATIONS_ARCHIVE: &str = "conversations.archive";
pub const CONVERSATIONS_CLOSE: &str = "conversations.close";
pub const CONVERSATIONS_CREATE: &str = "conversations.create";
pub const CONVERSATIONS_HISTORY: &str = "conversations.history";
pub const CONVERSATIONS_INFO: &str = "conversations.info";
pub const CONVERSATIONS_INVITE: &str = "conversations.invite";
pub const CONVERSATIONS_JOIN: &str = "conversations.join";
pub const CONVERSATIONS_KICK: &str = "conversations.kick";
pub const CONVERSATIONS_LEAVE: &str = "conversations.leave";
pub const CONVERSATIONS_LIST: &str = "conversations.list";
pub const CONVERSATIONS_MARK: &str = "conversations.mark";
pub const CONVERSATIONS_MEMBERS: &str = "conversations.members";
pub const CONVERSATIONS_OPEN: &str = "conversations.open";
pub const CONVERSATIONS_RENAME: &str = "conversations.rename";
pub const CONVERSATIONS_REPLIES: &str = "conversations.replies";
pub const CONVERSATIONS_SET_PURPOSE: &str = "conversations.setPurpose";
pub const CONVERSATIONS_SET_TOPIC: &str = "conversations.setTopic";
pub const CONVERSATIONS_UNARCHIVE: &str = "conversations.unarchive";
pub const DND_END_SNOOZE: &str = "dnd.endSnooze";
pub const DND_INFO: &str = "dnd.info";
pub const DND_SET_SNOOZE: &str = "dnd.setSnooze";
pub const DND_TEAM_INFO: &str = "dnd.teamInfo";
pub const EMOJI_LIST: &str = "emoji.list";
pub const FILES_DELETE: &str = "files.delete";
pub const FILES_INFO: &str = "files.info";
pub const FILES_LIST: &str = "files.list";
pub const FILES_SHARED_PUBLIC_URL: &str = "files.sharedPublicURL";
pub const FILES_UPLOAD: &str = "files.upload";
pub const PINS_ADD: &str = "pins.add";
pub const PINS_LIST: &str = "pins.list";
pub const PINS_REMOVE: &str = "pins.remove";
pub const REACTIONS_ADD: &str = "reactions.add";
pub const REACTIONS_GET: &str = "reactions.get";
pub const REACTIONS_LIST: &str = "reactions.list";
pub const REACTIONS_REMOVE: &str = "reactions.remove";
pub const REMINDERS_ADD: &str = "reminders.add";
pub const REMINDERS_LIST: &str = "reminders.list";
pub const RTM_CONNECT: &str = "rtm.connect";
pub const RTM_START: &str = "rtm.start";
pub const SEARCH_ALL: &str = "search.all";
pub const SEARCH_FILES: &str = "search.files";
pub const SEARCH_MESSAGES: &str = "search.messages";
pub const STARS_ADD: &str = "stars.add";
pub const STARS_LIST: &str = "stars.list";
pub const STARS_REMOVE: &str = "stars.remove";
pub const TEAM_ACCESS_LOGS: &str = "team.accessLogs";
pub const TEAM_BILLABLE_INFO: &str = "team.billableInfo";
pub const TEAM_INFO: &str = "team.info";
pub const TEAM_INTEGRATION_LOGS: &str = "team.integrationLogs";
pub const TEAM_PROFILE_GET: &str = "team.profile.get";
pub const USERGROUPS_CREATE: &str = "usergroups.create";
pub const USERGROUPS_LIST: &str = "usergroups.list";
pub const USERGROUPS_UPDATE: &str = "usergroups.update";
pub const USERGROUPS_USERS_LIST: &str = "usergroups.users.list";
pub const USERGROUPS_USERS_UPDATE: &str = "usergroups.users.update";
pub const USERS_CONVERSATIONS: &str = "users.conversations";
pub const USERS_GET_PRESENCE: &str = "users.getPresence";
pub const USERS_IDENTITY: &str = "users.identity";
pub const USERS_INFO: &str = "users.info";
pub const USERS_LIST: &str = "users.list";
pub const USERS_LOOKUP_BY_EMAIL: &str = "users.lookupByEmail";
pub const USERS_PROFILE_GET: &str = "users.profile.get";
pub const USERS_PROFILE_SET: &str = "users.profile.set";
pub const USERS_SET_PHOTO: &str = "users.setPhoto";
pub const USERS_SET_PRESENCE: &str = "users.setPresence";
pub const VIEWS_OPEN: &str = "views.open";
pub const VIEWS_PUBLISH: &str = "views.publish";
pub const VIEWS_PUSH: &str = "views.push";
pub const VIEWS_UPDATE: &str = "views.update";

/// Every known method with its tier, sorted by method name.
pub(crate) const METHOD_TIERS: &[(&str, RateLimitTier)] = &[
    (API_TEST, RateLimitTier::Tier4),
    (APPS_UNINSTALL, RateLimitTier::Tier1),
    (ASSISTANT_THREADS_SET_STATUS, RateLimitTier::SpecialAssistantThreadsSetStatus),
    (ASSISTANT_THREADS_SET_SUGGESTED_PROMPTS, RateLimitTier::Tier4),
    (ASSISTANT_THREADS_SET_TITLE, RateLimitTier::Tier4),
    (AUTH_TEST, RateLimitTier::Tier4),
    (BOOKMARKS_ADD, RateLimitTier::Tier2),
    (BOOKMARKS_EDIT, RateLimitTier::Tier2),
    (BOOKMARKS_LIST, RateLimitTier::Tier3),
    (BOOKMARKS_REMOVE, RateLimitTier::Tier2),
    (BOTS_INFO, RateLimitTier::Tier3),
    (CHAT_DELETE, RateLimitTier::Tier3),
    (CHAT_DELETE_SCHEDULED_MESSAGE, RateLimitTier::Tier3),
    (CHAT_GET_PERMALINK, RateLimitTier::Tier4),
    (CHAT_ME_MESSAGE, RateLimitTier::Tier3),
    (CHAT_POST_EPHEMERAL, RateLimitTier::Tier4),
    (CHAT_POST_MESSAGE, RateLimitTier::SpecialChatPostMessage),
    (CHAT_SCHEDULE_MESSAGE, RateLimitTier::Tier3),
    (CHAT_SCHEDULED_MESSAGES_LIST, RateLimitTier::Tier3),
    (CHAT_UNFURL, RateLimitTier::Tier3),
    (CHAT_UPDATE, RateLimitTier::Tier3),
    (CONVERSATIONS_ARCHIVE, RateLimitTier::Tier2),
    (CONVERSATIONS_CLOSE, RateLimitTier::Tier3),
    (CONVERSATIONS_CREATE, RateLimitTier::Tier2),
    (CONVERSATIONS_HISTORY, RateLimitTier::Tier3),
    (CONVERSATIONS_INFO, RateLimitTier::Tier3),
    (CONVERSATIONS_INVITE, RateLimitTier::Tier3),
    (CONVERSATIONS_JOIN, RateLimitTier::Tier3),
    (CONVERSATIONS_KICK, RateLimitTier::Tier3),
    (CONVERSATIONS_LEAVE, RateLimitTier::Tier3),
    (CONVERSATIONS_LIST, RateLimitTier::Tier2),
    (CONVERSATIONS_MARK, RateLimitTier::Tier3),
    (CONVERSATIONS_MEMBERS, RateLimitTier::Tier4),
    (CONVERSATIONS_OPEN, RateLimitTier::Tier3),
    (CONVERSATIONS_RENAME, RateLimitTier::Tier2),
    (CONVERSATIONS_REPLIES, RateLimitTier::Tier3),
    (CONVERSATIONS_SET_PURPOSE, RateLimitTier::Tier2),
    (CONVERSATIONS_SET_TOPIC, RateLimitTier::Tier2),
    (CONVERSATIONS_UNARCHIVE, RateLimitTier::Tier2),
    (DND_END_SNOOZE, RateLimitTier::Tier3),
    (DND_INFO, RateLimitTier::Tier3),
    (DND_SET_SNOOZE, RateLimitTier::Tier3),
    (DND_TEAM_INFO, RateLimitTier::Tier4),
    (EMOJI_LIST, RateLimitTier::Tier2),
    (FILES_DELETE, RateLimitTier::Tier3),
    (FILES_INFO, RateLimitTier::Tier4),
    (FILES_LIST, RateLimitTier::Tier3),
    (FILES_SHARED_PUBLIC_URL, RateLimitTier::Tier3),
    (FILES_UPLOAD, RateLimitTier::Tier2),
    (PINS_ADD, RateLimitTier::Tier2),
    (PINS_LIST, RateLimitTier::Tier2),
    (PINS_REMOVE, RateLimitTier::Tier2),
    (REACTIONS_ADD, RateLimitTier::Tier3),
    (REACTIONS_GET, RateLimitTier::Tier3),
    (REACTIONS_LIST, RateLimitTier::Tier2),
    (REACTIONS_REMOVE, RateLimitTier::Tier2),
    (REMINDERS_ADD, RateLimitTier::Tier2),
    (REMINDERS_LIST, RateLimitTier::Tier2),
    (RTM_CONNECT, RateLimitTier::Tier1),
    (RTM_START, RateLimitTier::Tier1),
    (SEARCH_ALL, RateLimitTier::Tier2),
    (SEARCH_FILES, RateLimitTier::Tier2),
    (SEARCH_MESSAGES, RateLimitTier::Tier2),
    (STARS_ADD, RateLimitTier::Tier2),
    (STARS_LIST, RateLimitTier::Tier2),
    (STARS_REMOVE, RateLimitTier::Tier2),
    (TEAM_ACCESS_LOGS, RateLimitTier::Tier2),
    (TEAM_BILLABLE_INFO, RateLimitTier::Tier2),
    (TEAM_INFO, RateLimitTier::Tier3),
    (TEAM_INTEGRATION_LOGS, RateLimitTier::Tier2),
    (TEAM_PROFILE_GET, RateLimitTier::Tier3),
    (USERGROUPS_CREATE, RateLimitTier::Tier2),
    (USERGROUPS_LIST, RateLimitTier::Tier2),
    (USERGROUPS_UPDATE, RateLimitTier::Tier2),
    (USERGROUPS_USERS_LIST, RateLimitTier::Tier2),
    (USERGROUPS_USERS_UPDATE, RateLimitTier::Tier2),
    (USERS_CONVERSATIONS, RateLimitTier::Tier3),
    (USERS_GET_PRESENCE, RateLimitTier::Tier4),
    (USERS_IDENTITY, RateLimitTier::Tier4),
    (USERS_INFO, RateLimitTier::Tier4),
    (USERS_LIST, RateLimitTier::Tier2),
    (USERS_LOOKUP_BY_EMAIL, RateLimitTier::Tier3),
    (USERS_PROFILE_GET, RateLimitTier::Tier4),
    (USERS_PROFILE_SET, RateLimitTier::Tier3),
    (USERS_SET_PHOTO, RateLimitTier::Tier2),
    (USERS_SET_PRESENCE, RateLimitTier::Tier3),
    (VIEWS_OPEN, RateLimitTier::Tier4),
    (VIEWS_PUBLISH, RateLimitTier::Tier4),
    (VIEWS_PUSH, RateLimitTier::Tier4),
    (VIEWS_UPDATE, RateLimitTier::Tier4),
];
