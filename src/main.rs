use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wordpace::config::DEFAULT_CONFIG_PATH;
use wordpace::{Book, Epub, PlaybackState, ReaderConfig, Result, Session, interval_for_wpm, load_book, split_anchor};

/// 📚 wordpace - EPUB逐词快速阅读工具
#[derive(Parser)]
#[command(name = "wordpace")]
#[command(about = "把EPUB拆成单词流，按设定的速度逐词显示")]
#[command(version)]
struct Args {
    /// EPUB文件路径
    #[arg(help = "要阅读的EPUB文件路径", required_unless_present = "init_config")]
    epub_file: Option<PathBuf>,

    /// 每分钟单词数
    #[arg(short, long, help = "每分钟单词数（覆盖配置文件）")]
    wpm: Option<u32>,

    /// 起始单词
    #[arg(short, long, help = "从第几个单词开始（从1开始，覆盖配置文件）")]
    start_word: Option<usize>,

    /// 起始章节
    #[arg(short, long, help = "从指定章节开头开始（从1开始）")]
    chapter: Option<usize>,

    /// 只列出章节
    #[arg(short, long, help = "列出书名、单词数和章节后退出")]
    list_chapters: bool,

    /// 配置文件路径
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, help = "YAML配置文件路径")]
    config: PathBuf,

    /// 生成默认配置文件
    #[arg(long, help = "把默认配置写入 --config 指定的路径后退出")]
    init_config: bool,

    /// 详细输出模式
    #[arg(short, long, help = "输出调试日志")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    if args.init_config {
        ReaderConfig::write_default(&args.config)?;
        println!("✅ 已生成配置文件: {}", args.config.display());
        return Ok(());
    }

    let mut config = ReaderConfig::load_or_default(&args.config)?;
    if let Some(wpm) = args.wpm {
        config.wpm = wpm;
    }
    if let Some(start_word) = args.start_word {
        config.start_word = start_word;
    }

    // clap 保证没有 --init-config 时一定有文件路径
    let Some(path) = args.epub_file else {
        return Ok(());
    };
    info!(path = %path.display(), wpm = config.wpm, "打开EPUB");

    let mut epub = Epub::from_path(&path)?;
    debug!(entries = ?epub.list_files(), "EPUB文件内容");
    let book = load_book(&mut epub, config.extract_options())?;

    if args.list_chapters {
        display_chapters(&book);
        return Ok(());
    }

    let mut session = Session::with_start_word(book, config.start_word);
    if let Some(chapter) = args.chapter {
        if chapter == 0 || !session.jump_to_chapter(chapter - 1) {
            println!("  ❌ 无效的章节索引: {}。可用范围: 1-{}", chapter, session.book().chapters.len());
            display_chapters(session.book());
            return Ok(());
        }
    }

    read(&mut session, config.wpm)
}

/// 显示书名和章节列表
fn display_chapters(book: &Book) {
    if let Some(title) = &book.title {
        println!("📖 {}", title);
    }
    println!("  共 {} 个单词, {} 个章节", book.words.len(), book.chapters.len());
    for (i, chapter) in book.chapters.iter().enumerate() {
        println!("    {}. {} [{}-{}]", i + 1, chapter.title, chapter.start_index + 1, chapter.end_index + 1);
    }
}

/// 按设定速度逐词显示，直到读完
fn read(session: &mut Session, wpm: u32) -> Result<()> {
    let interval = interval_for_wpm(wpm);
    let mut stdout = io::stdout();

    session.start();
    render(session, &mut stdout)?;
    while session.state() == PlaybackState::Running {
        thread::sleep(interval);
        if session.tick() == PlaybackState::Running {
            render(session, &mut stdout)?;
        }
    }

    writeln!(stdout, "\r\x1b[2KDone")?;
    Ok(())
}

/// 在同一行上重绘当前单词，锚点字母高亮
fn render(session: &Session, out: &mut impl Write) -> Result<()> {
    let Some(word) = session.current_word() else {
        return Ok(());
    };
    let (before, anchor, after) = split_anchor(word);
    let (current, total) = session.progress();
    let chapter = session.current_chapter().map(|c| c.title.as_str()).unwrap_or_default();

    write!(
        out,
        "\r\x1b[2K{}\x1b[1;31m{}\x1b[0m{}    Word {} of {} · {}",
        before, anchor, after, current, total, chapter
    )?;
    out.flush()?;
    Ok(())
}
