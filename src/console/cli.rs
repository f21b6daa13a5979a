use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "manager")]
#[command(about = "console used by restaurant managers to run their restaurant", version, long_about = None
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// store the access token issued at sign in
    #[command(arg_required_else_help = true)]
    Login {
        #[arg(long, help = "Bearer token issued by the backend.")]
        token: String,
    },
    /// forget the stored access token
    Logout,
    /// resolve a client route against the current session
    #[command(arg_required_else_help = true)]
    Navigate { path: String },
    /// menu item related ops
    #[command(arg_required_else_help = true)]
    Menu(MenuArgs),
    /// restaurant profile related ops
    #[command(arg_required_else_help = true)]
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    #[command(subcommand)]
    pub command: MenuCmds,
}

#[derive(Debug, Subcommand)]
pub(crate) enum MenuCmds {
    /// add a new menu item
    #[command(arg_required_else_help = true)]
    Add(MenuItemArgs),
    /// replace an existing menu item, image and tags not given are reset to the placeholder and none
    #[command(arg_required_else_help = true)]
    Edit {
        #[arg(help = "Id of the menu item to edit.")]
        id: String,
        #[command(flatten)]
        item: MenuItemArgs,
    },
}

#[derive(Debug, Args)]
pub(crate) struct MenuItemArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, help = "Price, must be greater than 0.")]
    pub price: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long = "tag", help = "Tag to attach, repeatable.", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCmds,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ProfileCmds {
    /// print the restaurant profile
    Show,
    /// change profile fields, others are left as they are
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Comma separated tags, replaces the current ones.")]
        tags: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn menu_edit_help_warns_about_reset_fields() {
        let cli = Cli::command();
        let about = cli
            .find_subcommand("menu")
            .and_then(|menu| menu.find_subcommand("edit"))
            .and_then(|edit| edit.get_about())
            .map(|about| about.to_string())
            .unwrap();
        assert!(about.contains("image and tags not given are reset"), "{about}");
    }

    #[test]
    fn parse_menu_edit() {
        let cli = Cli::try_parse_from([
            "manager", "menu", "edit", "m-1", "--name", "Soup", "--price", "4.5", "--tag", "Hot", "--tag", "Veg",
        ])
        .unwrap();
        let Commands::Menu(MenuArgs {
            command: MenuCmds::Edit { id, item },
        }) = cli.command
        else {
            panic!("should parse menu edit");
        };
        assert_eq!(id, "m-1");
        assert_eq!(item.tags, vec!["Hot", "Veg"]);
        assert_eq!(item.price, "4.5");
    }
}
