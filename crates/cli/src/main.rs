use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use lectern_app::catalog::{Availability, BookSource, CatalogError, CatalogView, SortKey, ALL};
use lectern_app::reservation::{
    parse_date, BookContext, ChannelNavigator, Field, Route, SubmitOutcome,
};
use lectern_app::AppModules;
use lectern_kernel::settings::Settings;
use lectern_kernel::{InitCtx, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "lectern", about = "Browse the library catalog and reserve books")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog entries matching the given filters
    Browse(BrowseArgs),
    /// Show the values offered by the genre, author and year selectors
    Facets {
        #[arg(long)]
        json: bool,
    },
    /// Show a single catalog entry
    Show { id: u32 },
    /// Fill in and submit a reservation form
    Reserve(ReserveArgs),
}

#[derive(Debug, Args)]
struct BrowseArgs {
    /// Case-insensitive text matched against title and author
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = ALL)]
    genre: String,
    #[arg(long, default_value = ALL)]
    author: String,
    #[arg(long, default_value = ALL)]
    year: String,
    /// all, available or unavailable
    #[arg(long, default_value = "all")]
    availability: Availability,
    /// relevance, title, year or rating
    #[arg(long, default_value = "relevance")]
    sort: SortKey,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ReserveArgs {
    /// Reserve a catalog entry by id instead of passing its details
    #[arg(long, conflicts_with_all = ["title", "author", "year", "isbn"])]
    book_id: Option<u32>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    isbn: Option<String>,

    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    middle_name: String,
    #[arg(long, default_value = "")]
    library_card: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// YYYY-MM-DD; defaults to today
    #[arg(long)]
    pickup_date: Option<String>,
    /// Override the configured delay before returning to the catalog
    #[arg(long)]
    redirect_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Lectern settings")?;
    if let Command::Reserve(ReserveArgs {
        redirect_delay_ms: Some(delay),
        ..
    }) = &cli.command
    {
        settings.reservation.redirect_delay_ms = *delay;
    }
    lectern_telemetry::init(&settings.telemetry)?;

    let mut registry = ModuleRegistry::new();
    let modules = lectern_app::modules::register_all(&mut registry, &settings);
    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let result = match cli.command {
        Command::Browse(args) => browse(&modules, &settings, args),
        Command::Facets { json } => facets(&modules, &settings, json),
        Command::Show { id } => show(&modules, id),
        Command::Reserve(args) => reserve(&modules, args).await,
    };

    registry.stop_all().await?;
    result
}

fn browse(modules: &AppModules, settings: &Settings, args: BrowseArgs) -> anyhow::Result<()> {
    let mut view = CatalogView::new(modules.catalog.source().clone(), settings.catalog.page_size)?;
    view.set_search_term(args.search);
    view.set_genre(args.genre);
    view.set_author(args.author);
    view.set_year(args.year);
    view.set_availability(args.availability);
    view.set_sort(args.sort);
    view.go_to_page(args.page);

    let page = view.page();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!("Found {} book(s)", page.result_count);
    for book in &page.displayed_books {
        println!(
            "{:>3}  {} ({}) by {} [{}] rating {:.1}, {} pages, ISBN {}, {}",
            book.id,
            book.title,
            book.year,
            book.author,
            book.genre,
            book.rating,
            book.pages,
            book.isbn,
            book.availability_label()
        );
    }
    println!("Page {} of {}", page.current_page, page.total_pages.max(1));
    if view.pager().can_go_forward {
        println!("Next page: --page {}", page.current_page + 1);
    }
    Ok(())
}

fn facets(modules: &AppModules, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let view = CatalogView::new(modules.catalog.source().clone(), settings.catalog.page_size)?;
    let facets = view.facets();
    if json {
        println!("{}", serde_json::to_string_pretty(&facets)?);
        return Ok(());
    }

    println!("genres:  {}", facets.genres.join(", "));
    println!("authors: {}", facets.authors.join(", "));
    println!("years:   {}", facets.years.join(", "));
    Ok(())
}

fn show(modules: &AppModules, id: u32) -> anyhow::Result<()> {
    let book = modules
        .catalog
        .source()
        .find(id)
        .ok_or(CatalogError::BookNotFound(id))?;

    println!("{}", book.title);
    println!("  author:  {}", book.author);
    println!("  year:    {}", book.year);
    println!("  genre:   {}", book.genre);
    println!("  pages:   {}", book.pages);
    println!("  rating:  {:.1}", book.rating);
    println!("  isbn:    {}", book.isbn);
    println!("  status:  {}", book.availability_label());

    let args: Vec<String> = BookContext::from(book)
        .to_params()
        .into_iter()
        .map(|(key, value)| format!("--{key} {value:?}"))
        .collect();
    println!("Reserve: lectern reserve {}", args.join(" "));
    Ok(())
}

async fn reserve(modules: &AppModules, args: ReserveArgs) -> anyhow::Result<()> {
    let book = match args.book_id {
        Some(id) => {
            let book = modules
                .catalog
                .source()
                .find(id)
                .ok_or(CatalogError::BookNotFound(id))?;
            BookContext::from(book)
        }
        None => BookContext::from_params([
            ("title", args.title.unwrap_or_default()),
            ("author", args.author.unwrap_or_default()),
            ("year", args.year.unwrap_or_default()),
            ("isbn", args.isbn.unwrap_or_default()),
        ]),
    };

    let today = time::OffsetDateTime::now_utc().date();
    let (navigator, mut routes) = ChannelNavigator::new();
    let mut form = modules
        .reservation
        .open_form(book, today, Arc::new(navigator));

    form.set_field(Field::LastName, args.last_name);
    form.set_field(Field::FirstName, args.first_name);
    form.set_field(Field::MiddleName, args.middle_name);
    form.set_field(Field::LibraryCard, args.library_card);
    form.set_field(Field::Email, args.email);
    form.set_field(Field::Phone, args.phone);
    if let Some(date) = args.pickup_date {
        form.set_pickup_date(parse_date(&date)?)?;
    }

    let request = match form.submit()? {
        SubmitOutcome::Accepted(request) => request,
        SubmitOutcome::Rejected { missing } => {
            let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
            bail!("reservation incomplete; missing: {}", names.join(", "));
        }
        SubmitOutcome::AlreadySubmitted => bail!("reservation was already submitted"),
    };

    println!(
        "Reserved \"{}\" by {} ({}), ISBN {}",
        request.book.title, request.book.author, request.book.year, request.book.isbn
    );
    println!("Pickup date: {}", request.pickup_date);
    println!("Reservation terms:");
    for line in form.terms().lines() {
        println!("  - {line}");
    }
    if let Some(message) = form.confirmation_message() {
        println!("{message}");
    }

    match routes.recv().await {
        Some(Route::Catalog) => println!("Returning to catalog"),
        None => bail!("navigation channel closed before the redirect"),
    }
    Ok(())
}
