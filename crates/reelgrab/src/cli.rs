use clap::{Parser, Subcommand, ValueEnum};
use grabcore::resolve::SaveType;

#[derive(Parser)]
#[command(name = "reelgrab")]
#[command(author, version, about = "Resolve Instagram post/reel URLs to downloadable media URLs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the resolution HTTP service
    Serve {
        /// Port to listen on (falls back to WEB_PORT, then 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Resolve a single URL from the command line and print the result
    Resolve {
        /// Instagram post/reel/tv URL
        url: String,

        /// What to save from the post
        #[arg(short, long, value_enum, default_value = "reel")]
        save_type: SaveTypeArg,
    },
}

/// CLI mirror of the wire `saveType` values. Unknown values are rejected
/// at parse time instead of silently falling back to a video download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SaveTypeArg {
    /// Download the video (alias: video)
    #[value(alias = "video")]
    Reel,
    /// Video URL with the audio-conversion advisory
    Audio,
}

impl From<SaveTypeArg> for SaveType {
    fn from(arg: SaveTypeArg) -> Self {
        match arg {
            SaveTypeArg::Reel => SaveType::Reel,
            SaveTypeArg::Audio => SaveType::Audio,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::unreachable)]

    use super::*;

    fn parse_resolve(args: &[&str]) -> Result<SaveTypeArg, clap::Error> {
        let mut argv = vec!["reelgrab", "resolve", "https://www.instagram.com/reel/Abc123/"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).map(|cli| match cli.command {
            Some(Commands::Resolve { save_type, .. }) => save_type,
            _ => unreachable!("resolve subcommand was given"),
        })
    }

    #[test]
    fn test_save_type_values_parse() {
        assert_eq!(parse_resolve(&[]).unwrap(), SaveTypeArg::Reel);
        assert_eq!(parse_resolve(&["--save-type", "reel"]).unwrap(), SaveTypeArg::Reel);
        assert_eq!(parse_resolve(&["--save-type", "video"]).unwrap(), SaveTypeArg::Reel);
        assert_eq!(parse_resolve(&["--save-type", "audio"]).unwrap(), SaveTypeArg::Audio);
    }

    #[test]
    fn test_unknown_save_type_is_rejected() {
        assert!(parse_resolve(&["--save-type", "gif"]).is_err());
    }
}
