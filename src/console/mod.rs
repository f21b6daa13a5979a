//! main module for the console

mod api;
pub(crate) mod cli;
mod controller;
pub(crate) mod model;
mod routes;
mod state;
mod storage;

use anyhow::{anyhow, Context, Error};
use log::{info, warn};
use crate::console::api::ApiClient;
use crate::console::cli::{Commands, MenuCmds, MenuItemArgs, ProfileCmds};
use crate::console::controller::form::{EditForm, SubmitOutcome};
use crate::console::controller::menu::MenuPage;
use crate::console::controller::profile::ProfilePage;
use crate::console::model::config::ClientConfig;
use crate::console::model::draft::Draft;
use crate::console::model::menu_item::{MenuItem, MenuItemDraft, MenuItemField};
use crate::console::model::restaurant::{Restaurant, RestaurantField};
use crate::console::routes::Navigation;
use crate::console::state::MenuCatalog;
use crate::console::storage::{access_token, FileStorage, LocalStorage, ACCESS_TOKEN_KEY};

/// Run one console command
pub(crate) async fn run(ClientConfig { api_base, storage_path }: ClientConfig, command: Commands) -> Result<(), Error> {
    let mut storage = FileStorage::open(storage_path)?;

    match command {
        Commands::Login { token } => {
            storage.set_item(ACCESS_TOKEN_KEY, &token)?;
            println!("signed in");
        }
        Commands::Logout => {
            storage.remove_item(ACCESS_TOKEN_KEY)?;
            println!("signed out");
        }
        Commands::Navigate { path } => match routes::resolve(&path, &storage) {
            Navigation::Render { page, params } if params.is_empty() => println!("render {}", page),
            Navigation::Render { page, params } => println!("render {} with {:?}", page, params),
            Navigation::Redirect(to) => println!("redirect to {}", to),
            Navigation::NotFound => println!("no route matches {}", path),
        },
        Commands::Menu(menu) => {
            let api = ApiClient::new(api_base, access_token(&storage));
            let mut page = MenuPage::new(MenuCatalog::default());
            let args = match menu.command {
                MenuCmds::Add(args) => {
                    page.open_new();
                    args
                }
                MenuCmds::Edit { id, item: args } => {
                    if args.image_url.is_none() || args.tags.is_empty() {
                        warn!("menu item {} is replaced as a whole, missing image or tags are reset", id);
                    }
                    page.open_edit(&MenuItem {
                        id,
                        name: args.name.clone(),
                        description: args.description.clone().unwrap_or_default(),
                        price: 0.0,
                        image_url: args.image_url.clone(),
                        tags: Some(Default::default()),
                    });
                    args
                }
            };
            fill_menu_item(page.modal_mut(), args);
            let outcome = page.save(&api).await;
            report(outcome, page.modal().errors().iter().map(|(f, m)| format!("{}: {}", f, m)))?;
            for item in page.catalog().items() {
                print_menu_item(item);
            }
        }
        Commands::Profile(profile) => {
            let api = ApiClient::new(api_base, access_token(&storage));
            let mut page = ProfilePage::new();
            page.load(&api).await.map_err(|message| anyhow!(message))?;

            if let ProfileCmds::Update { name, description, tags, address, phone } = profile.command {
                page.edit();
                let fields = [
                    (RestaurantField::Name, name),
                    (RestaurantField::Description, description),
                    (RestaurantField::Tags, tags),
                    (RestaurantField::Address, address),
                    (RestaurantField::Phone, phone),
                ];
                for (field, value) in fields {
                    if let Some(value) = value {
                        page.edit_field(field, &value);
                    }
                }
                report(page.save(&api).await, std::iter::empty())?;
            }
            let info = page.store().info.as_ref().context("restaurant profile missing after load")?;
            print_restaurant(info);
        }
    };
    Ok(())
}

fn fill_menu_item(form: &mut EditForm<MenuItemDraft>, args: MenuItemArgs) {
    form.edit(MenuItemField::Name, &args.name);
    form.edit(MenuItemField::Price, &args.price);
    if let Some(description) = args.description {
        form.edit(MenuItemField::Description, &description);
    }
    if let Some(image_url) = args.image_url {
        form.edit(MenuItemField::ImageUrl, &image_url);
    }
    for tag in args.tags {
        form.set_new_tag(&tag);
        if !form.add_tag() {
            info!("skipping tag {:?}, empty or already present", tag);
        }
    }
}

fn report(outcome: SubmitOutcome, field_errors: impl Iterator<Item = String>) -> Result<(), Error> {
    match outcome {
        SubmitOutcome::Saved => {
            println!("saved successfully");
            Ok(())
        }
        SubmitOutcome::Failed(message) => Err(anyhow!(message)),
        SubmitOutcome::Rejected(rejected) => {
            let details = field_errors.collect::<Vec<_>>();
            Err(anyhow!("submit rejected ({:?}) {}", rejected, details.join("; ")))
        }
        SubmitOutcome::Discarded => Err(anyhow!("response arrived after the form was closed")),
    }
}

fn print_menu_item(item: &MenuItem) {
    let draft = MenuItemDraft::from_entity(item);
    println!("[{}] {} - {:.2}", item.id, draft.name, draft.price);
    if !draft.description.is_empty() {
        println!("    {}", draft.description);
    }
    println!("    image: {}", draft.image_url);
    println!("    tags: {}", draft.tags.as_slice().join(", "));
}

fn print_restaurant(restaurant: &Restaurant) {
    println!("{} ({})", restaurant.name, restaurant.id);
    println!("    {}", restaurant.description);
    println!("    tags: {}", restaurant.tags.as_slice().join(", "));
    println!("    address: {}", restaurant.address);
    println!("    phone: {}", restaurant.phone);
    if let Some(updated_at) = restaurant.updated_at {
        println!("    last updated: {}", updated_at.format("%Y-%m-%dT%H:%M:%S"));
    }
}
