use std::path::PathBuf;
use std::sync::Arc;
use std::{fs, io};

use chrono::Utc;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::info;

use crate::config::{Config, TomlDate};
use crate::content::files::read_content_file;
use crate::content::markdown::render_markdown;
use crate::content::programs::{all_programs, program_by_slug, programs_feed};
use crate::content::{ContentItem, ContentType, PostRecord, ProgramRecord, PromptRecord};
use crate::query_string::QueryString;
use crate::store::{filter_by_tag, filter_by_type, tag_frequencies, ContentStore};
use crate::text_utils::week_of_life;
use crate::view::home_renderer::{HomeRenderer, HomeView};
use crate::view::list_renderer::ListRenderer;
use crate::view::page_renderer::PageRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::prompt_renderer::PromptRenderer;
use crate::view::content_link;
use crate::wire::serialize_feed;

struct AppState {
    config: Config,
    store: ContentStore,
}

fn read_template(tpl_dir: &PathBuf, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    fs::read_to_string(full_path)
}

fn get_query_tag(req: &HttpRequest) -> Option<String> {
    let query_str = req.uri().query()?;
    let qs = QueryString::from(query_str);
    qs.tag().map(|s| s.to_string())
}

fn get_file(root_dir: &PathBuf, dir: String, file: String) -> Result<NamedFile, web::Error> {
    if dir.contains("../") || file.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = root_dir.join(dir).join(file);
    Ok(NamedFile::open(file_path)?)
}

async fn render_home(state: &AppState) -> io::Result<String> {
    let feed = state.store.all_content().await?;

    let template_src = read_template(&state.config.paths.template_dir, "index.tpl")?;
    let renderer = HomeRenderer::new(&template_src)?;

    let program_items = programs_feed();
    let post_count = filter_by_type(&feed, ContentType::Post).len() as u32;
    let prompt_count = filter_by_type(&feed, ContentType::Prompt).len() as u32;
    let recent: Vec<&ContentItem> = feed
        .iter()
        .take(state.config.defaults.feed_preview_count)
        .collect();
    let week = state
        .config
        .site
        .birth_date
        .map(|TomlDate(birth)| week_of_life(birth, Utc::now().date_naive()));

    Ok(renderer.render(&HomeView {
        site_title: &state.config.site.title,
        author: &state.config.site.author,
        week_of_life: week,
        post_count,
        prompt_count,
        program_count: program_items.len() as u32,
        recent,
        programs: program_items.iter().collect(),
    }))
}

async fn render_feed_list(
    state: &AppState,
    content_type: ContentType,
    tag: Option<&str>,
) -> io::Result<String> {
    let feed = state.store.all_content().await?;

    let matching_tag: Vec<&ContentItem> = match tag {
        None => feed.iter().collect(),
        Some(t) => filter_by_tag(&feed, t),
    };
    let shown: Vec<&ContentItem> = matching_tag
        .into_iter()
        .filter(|item| item.content_type() == content_type)
        .collect();

    // The tag cloud always covers the whole collection, not the filtered view
    let of_type = filter_by_type(&feed, content_type);
    let tags = tag_frequencies(&of_type);

    let (template_name, heading, intro) = match content_type {
        ContentType::Post => ("postlist.tpl", "Posts", "Longer writing, newest first."),
        ContentType::Prompt => (
            "promptlist.tpl",
            "Prompts",
            "Reusable prompts I keep coming back to.",
        ),
        ContentType::Program => ("programlist.tpl", "Programs", "Small interactive tools."),
    };

    let template_src = read_template(&state.config.paths.template_dir, template_name)?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(heading, intro, &shown, &tags))
}

fn render_programs_list(state: &AppState) -> io::Result<String> {
    let feed = programs_feed();
    let items: Vec<&ContentItem> = feed.iter().collect();

    let template_src = read_template(&state.config.paths.template_dir, "programlist.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(
        "Programs",
        "Small interactive tools that run in the browser.",
        &items,
        &[],
    ))
}

fn render_post_page(state: &AppState, post: &PostRecord) -> io::Result<String> {
    let content_html = render_markdown(&post.content)?;
    let template_src = read_template(&state.config.paths.template_dir, "post.tpl")?;
    let renderer = PostRenderer::new(&template_src)?;
    Ok(renderer.render(post, &content_html))
}

fn render_prompt_page(state: &AppState, prompt: &PromptRecord) -> io::Result<String> {
    let context_html = match prompt.context {
        Some(ref context) => render_markdown(context)?,
        None => String::new(),
    };
    let template_src = read_template(&state.config.paths.template_dir, "prompt.tpl")?;
    let renderer = PromptRenderer::new(&template_src)?;
    Ok(renderer.render(prompt, &context_html))
}

fn render_program_page(state: &AppState, program: &ProgramRecord) -> io::Result<String> {
    let shell = (program.page)();
    let template_src = read_template(&state.config.paths.template_dir, "page.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render(&program.meta.title, &shell))
}

fn render_story(state: &AppState) -> io::Result<String> {
    let story_path = state.config.paths.pages_dir.join("story.md");
    let raw = read_content_file(&story_path)?;
    let content_html = render_markdown(&raw)?;

    let template_src = read_template(&state.config.paths.template_dir, "page.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render("My story", &content_html))
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match render_home(&state).await {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering home page: {}", e)),
    }
}

#[web::get("/posts")]
async fn posts(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let tag = get_query_tag(&req);
    match render_feed_list(&state, ContentType::Post, tag.as_deref()).await {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error listing posts: {}", e))
        }
    }
}

#[web::get("/blog/{slug}")]
async fn view_post(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let slug = path.into_inner();
    let post = match state.store.post_by_slug(&slug).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return web::HttpResponse::NotFound().body(format!("Post not found: {}", slug));
        }
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error loading post {}: {}", slug, e));
        }
    };

    match render_post_page(&state, &post) {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering post {}: {}", slug, e)),
    }
}

#[web::get("/prompts")]
async fn prompts(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let tag = get_query_tag(&req);
    match render_feed_list(&state, ContentType::Prompt, tag.as_deref()).await {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error listing prompts: {}", e))
        }
    }
}

#[web::get("/prompts/{slug}")]
async fn view_prompt(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let slug = path.into_inner();
    let prompt = match state.store.prompt_by_slug(&slug).await {
        Ok(Some(prompt)) => prompt,
        Ok(None) => {
            return web::HttpResponse::NotFound().body(format!("Prompt not found: {}", slug));
        }
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error loading prompt {}: {}", slug, e));
        }
    };

    match render_prompt_page(&state, &prompt) {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering prompt {}: {}", slug, e)),
    }
}

#[web::get("/programs")]
async fn programs(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match render_programs_list(&state) {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error listing programs: {}", e))
        }
    }
}

#[web::get("/programs/{slug}")]
async fn view_program(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let slug = path.into_inner();
    let Some(program) = program_by_slug(&slug) else {
        return web::HttpResponse::NotFound().body(format!("Program not found: {}", slug));
    };

    match render_program_page(&state, program) {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering program {}: {}", slug, e)),
    }
}

#[web::get("/story")]
async fn story(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match render_story(&state) {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error rendering story: {}", e))
        }
    }
}

#[web::get("/api/content")]
async fn api_content(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let feed = match state.store.all_content().await {
        Ok(feed) => feed,
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error loading content: {}", e));
        }
    };

    web::HttpResponse::Ok().json(&serialize_feed(&feed))
}

#[web::get("/api/programs")]
async fn api_programs() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serialize_feed(&programs_feed()))
}

#[web::get("/public/{file_name}")]
async fn public_files(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

#[web::get("/public/{dir}/{file_name}")]
async fn public_dir_files(
    path: web::types::Path<(String, String)>,
    state: web::types::State<Arc<AppState>>,
) -> Result<NamedFile, web::Error> {
    let (dir, file) = path.into_inner();
    get_file(&state.config.paths.public_dir, dir, file)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let store = if config.defaults.content_cache_enabled {
        ContentStore::new(
            config.paths.posts_dir.clone(),
            config.paths.prompts_dir.clone(),
        )
    } else {
        ContentStore::non_caching(
            config.paths.posts_dir.clone(),
            config.paths.prompts_dir.clone(),
        )
    };

    // Load once before binding so broken content surfaces at startup
    let feed = store.all_content().await?;
    info!(
        "Loaded {} content items, {} programs",
        feed.len(),
        all_programs().len()
    );
    for item in feed.iter() {
        info!("{}: {}", item.content_type().as_str(), content_link(item));
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState { config, store });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(public_files)
            .service(public_dir_files)
            .service(posts)
            .service(view_post)
            .service(prompts)
            .service(view_prompt)
            .service(programs)
            .service(view_program)
            .service(story)
            .service(api_content)
            .service(api_programs)
    })
    .bind((bind_addr, bind_port))?
    .run()
    .await
}
