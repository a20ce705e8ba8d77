pub mod deploy;

pub type CmdResult<T> = mastodon_deploy::Result<T>;
