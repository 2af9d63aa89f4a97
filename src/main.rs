use std::sync::Arc;

use photo_organizer::error::Result;
use photo_organizer::message::AppError;
use photo_organizer::models::Tag;
use photo_organizer::popups::{Dialog, Saved};
use photo_organizer::services::PhotoService;
use photo_organizer::{ApiClient, Config, HomeController, PopupService};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const HELP: &str = "\
commands:
  ls                    show the current tag, its children and photos
  cd <n>                open child tag n
  back <n>              go back to breadcrumb n
  page <n>              show photo page n
  mark <n>              select / unselect photo n
  selected              list selected photos
  mktag <name>          create a tag under the current one
  rename <name>         rename the current tag
  rmtag                 delete the current tag and its sub-tags
  upload <file>         upload a photo into the current tag
  rmphoto <n>           delete photo n
  image <n>             fetch the full-size image of photo n
  login                 ask the server who is signed in
  quit";

type Home = HomeController<ApiClient>;
type Popups = PopupService<ApiClient>;

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let client = Arc::new(ApiClient::new(&config)?);
    info!(api = %client.base_url(), "starting photo organizer");

    let home = HomeController::from_config(client.clone(), &config);
    let popups = PopupService::new(client);

    report(home.resolve_identity().await.map(|account| match account {
        Some(account) => println!("signed in as {}", account.login),
        None => println!("not signed in, set PHOTO_API_TOKEN and run `login`"),
    }));
    println!("{HELP}");

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "ls" => show(&home),
            "login" => report(home.resolve_identity().await.map(|_| show(&home))),
            "cd" => match pick(&home.tags(), arg) {
                Some(tag) => report(home.select_tag(tag).await.map(|_| show(&home))),
                None => println!("no such child tag"),
            },
            "back" => match pick(&home.trail(), arg) {
                Some(tag) => report(home.select_tag(tag).await.map(|_| show(&home))),
                None => println!("no such breadcrumb"),
            },
            "page" => match arg.parse::<u32>() {
                Ok(page) if page > 0 => report(home.load_page(page).await.map(|_| show(&home))),
                _ => println!("page numbers start at 1"),
            },
            "mark" => match pick(&home.photos().items, arg) {
                Some(photo) => {
                    let marked = home.toggle_photo(&photo);
                    println!("{} {}", if marked { "selected" } else { "unselected" }, label(&photo));
                }
                None => println!("no such photo"),
            },
            "selected" => home.selected_photos().iter().for_each(|p| println!("  {}", label(p))),
            "mktag" => report(create_tag(&home, &popups, arg).await),
            "rename" => report(rename_tag(&home, &popups, arg).await),
            "rmtag" => report(delete_tag(&home, &popups).await),
            "upload" => report(upload(&home, &popups, arg).await),
            "rmphoto" => match pick(&home.photos().items, arg).and_then(|p| p.id) {
                Some(id) => report(delete_photo(&home, &popups, id).await),
                None => println!("no such photo"),
            },
            "image" => match pick(&home.photos().items, arg).and_then(|p| p.id) {
                Some(id) => report(home.backend().photo_image(id).await.map(|image| {
                    let kind = image.split(';').next().unwrap_or_default();
                    println!("{kind}, {} bytes encoded", image.len());
                })),
                None => println!("no such photo"),
            },
            _ => println!("unknown command {command:?}, try `help`"),
        }
    }

    Ok(())
}

fn show(home: &Home) {
    let trail: Vec<String> = home
        .trail()
        .iter()
        .enumerate()
        .map(|(i, tag)| format!("[{i}] {}", tag.label()))
        .collect();
    println!("{}", trail.join(" > "));

    for (i, tag) in home.tags().iter().enumerate() {
        println!("  tag {i}: {}", tag.label());
    }

    let photos = home.photos();
    let paging = home.paging();
    for (i, photo) in photos.items.iter().enumerate() {
        let mark = if home.is_photo_selected(photo) { "x" } else { " " };
        println!("  [{mark}] photo {i}: {}", label(photo));
    }
    match photos.total_count {
        Some(total) => println!("page {} ({total} photos)", paging.page),
        None => println!("page {}", paging.page),
    }
}

fn label(photo: &photo_organizer::models::Photo) -> String {
    photo.original_file_name().unwrap_or_else(|| "<unnamed>".to_string())
}

fn pick<T: Clone>(items: &[T], arg: &str) -> Option<T> {
    arg.parse::<usize>().ok().and_then(|i| items.get(i)).cloned()
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "command failed");
        println!("{}", AppError::from(&e).message());
    }
}

async fn finish<T>(home: &Home, popups: &Popups, saved: Result<Saved<T>>) -> Result<()> {
    popups.close();
    let saved = saved?;
    println!("{}", saved.notice.message());
    home.handle_event(saved.event).await?;
    show(home);
    Ok(())
}

async fn create_tag(home: &Home, popups: &Popups, name: &str) -> Result<()> {
    let parent_id = home.current_tag()?.id;
    let Dialog::TagEdit(mut dialog) = popups.open_tag(None, parent_id).await? else {
        println!("another dialog is open");
        return Ok(());
    };
    let account = home.account();
    let result = async {
        dialog.load_options(home.backend().as_ref(), account.as_ref()).await?;
        dialog.tag.name = Some(name.to_string());
        dialog.save(home.backend().as_ref()).await
    }
    .await;
    finish(home, popups, result).await
}

async fn rename_tag(home: &Home, popups: &Popups, name: &str) -> Result<()> {
    let current = home.current_tag()?;
    if current.is_root() {
        return Err(photo_organizer::Error::RootTagNotPersisted);
    }
    let Dialog::TagEdit(mut dialog) = popups.open_tag(current.id, current.parent_id()).await? else {
        println!("another dialog is open");
        return Ok(());
    };
    dialog.tag.name = Some(name.to_string());
    let result = dialog.save(home.backend().as_ref()).await;
    finish(home, popups, result).await
}

async fn delete_tag(home: &Home, popups: &Popups) -> Result<()> {
    let current: Tag = home.current_tag()?;
    let Dialog::DeleteConfirm(dialog) = popups.open_delete_tag(current.key()).await? else {
        println!("another dialog is open");
        return Ok(());
    };
    println!("{}", dialog.prompt());
    let result = dialog.confirm(home.backend().as_ref()).await;
    finish(home, popups, result).await
}

async fn delete_photo(home: &Home, popups: &Popups, id: i64) -> Result<()> {
    let Dialog::DeleteConfirm(dialog) = popups.open_delete_photo(id).await? else {
        println!("another dialog is open");
        return Ok(());
    };
    println!("{}", dialog.prompt());
    let result = dialog.confirm(home.backend().as_ref()).await;
    finish(home, popups, result).await
}

async fn upload(home: &Home, popups: &Popups, path: &str) -> Result<()> {
    let account = home.account().ok_or(photo_organizer::Error::IncompleteForm("a signed-in account"))?;
    let current = home.current_tag()?;
    let Dialog::PhotoEdit(dialog) = popups.open_photo(None, Some(current)).await? else {
        println!("another dialog is open");
        return Ok(());
    };
    let result = dialog.save_file(home.backend().as_ref(), path, account.id).await;
    finish(home, popups, result).await
}
