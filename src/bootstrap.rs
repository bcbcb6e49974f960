// Schema creation, column migration and first-run seeding
use sqlx::{Row, SqlitePool};

const HERO_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS hero (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    background_image TEXT NOT NULL DEFAULT '../assets/images/fullscreen.png',
    title_cn TEXT NOT NULL DEFAULT 'HEMU',
    title_en TEXT NOT NULL DEFAULT '',
    subtitle_cn TEXT NOT NULL DEFAULT '探索美学与商业的无限可能',
    subtitle_en TEXT NOT NULL DEFAULT 'Exploring the infinite possibilities of aesthetics and commerce',
    cta_text_cn TEXT NOT NULL DEFAULT 'WHO WE ARE',
    cta_text_en TEXT NOT NULL DEFAULT '',
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const ABOUT_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS about (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    image TEXT NOT NULL DEFAULT '../assets/images/whoweare.jpg',
    title_cn TEXT NOT NULL DEFAULT '禾木',
    subtitle_cn TEXT NOT NULL DEFAULT '生长于城市缝隙的创意力量',
    description_cn TEXT NOT NULL DEFAULT '',
    description2_cn TEXT NOT NULL DEFAULT '',
    projects_count INTEGER NOT NULL DEFAULT 100,
    partners_count INTEGER NOT NULL DEFAULT 50,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const SERVICES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS services (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title_cn TEXT NOT NULL,
    title_en TEXT NOT NULL,
    description TEXT NOT NULL,
    icon_name TEXT NOT NULL,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const PROCESS_STEPS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS process_steps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CASES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS cases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    category TEXT NOT NULL,
    image TEXT NOT NULL,
    location TEXT NOT NULL,
    year TEXT NOT NULL,
    description TEXT,
    content TEXT,
    gallery_images TEXT,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const ADMINS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS admins (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Create missing tables, add columns older database files lack, then seed
/// default content into empty tables. Runs on every startup; each step is
/// idempotent.
pub async fn init(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_tables(pool).await?;
    migrate(pool).await?;
    seed(pool).await?;
    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in [
        HERO_DDL,
        ABOUT_DDL,
        SERVICES_DDL,
        PROCESS_STEPS_DDL,
        CASES_DDL,
        ADMINS_DDL,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Columns added after the first deployments. CREATE TABLE IF NOT EXISTS
/// leaves existing files alone, so they are upgraded in place here.
async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    add_missing_columns(
        pool,
        "cases",
        &[
            ("description", "TEXT"),
            ("content", "TEXT"),
            ("gallery_images", "TEXT"),
        ],
    )
    .await?;

    // first-generation services and process_steps rows carry no created_at
    for table in ["services", "process_steps"] {
        add_missing_columns(pool, table, &[("created_at", "DATETIME")]).await?;
        let sql = format!(
            "UPDATE {} SET created_at = updated_at WHERE created_at IS NULL",
            table
        );
        sqlx::query(&sql).execute(pool).await?;
    }
    Ok(())
}

async fn add_missing_columns(
    pool: &SqlitePool,
    table: &str,
    columns: &[(&str, &str)],
) -> Result<(), sqlx::Error> {
    let pragma = format!("PRAGMA table_info({})", table);
    let rows = sqlx::query(&pragma).fetch_all(pool).await?;
    let mut existing = Vec::with_capacity(rows.len());
    for row in &rows {
        existing.push(row.try_get::<String, _>("name")?);
    }

    for (name, declaration) in columns {
        if !existing.iter().any(|column| column == name) {
            let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, name, declaration);
            sqlx::query(&sql).execute(pool).await?;
            tracing::info!("Added column {}.{}", table, name);
        }
    }
    Ok(())
}

async fn seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    if table_is_empty(pool, "hero").await? {
        sqlx::query(
            "INSERT INTO hero (background_image, title_cn, subtitle_cn, cta_text_cn) \
             VALUES ('../assets/images/fullscreen.png', 'HEMU', '探索美学与商业的无限可能', 'WHO WE ARE')",
        )
        .execute(pool)
        .await?;
    }

    if table_is_empty(pool, "about").await? {
        sqlx::query(
            "INSERT INTO about (image, title_cn, subtitle_cn, description_cn, description2_cn, projects_count, partners_count) \
             VALUES (?, ?, ?, ?, ?, 100, 50)",
        )
        .bind("../assets/images/whoweare.jpg")
        .bind("禾木")
        .bind("生长于城市缝隙的创意力量")
        .bind("HEMU位于成都，是专注城市及品牌公关活动的创意策划及统筹执行团队。着眼品牌长期价值，善于在地文化、艺术及跨地域资源整合，具有丰富的创意活动策划落地经验，将品牌及产品营销策略转化为“线上+线下”整合传播内容，赋能品牌价值新增量。")
        .bind("秉持原创精神，以“品效合一”为理念，链接年轻人的“创意”与“生意”，探索美学与商业的无限可能。")
        .execute(pool)
        .await?;
    }

    if table_is_empty(pool, "services").await? {
        let services = [
            ("城市文旅", "City Culture & Tourism", "挖掘城市文化内核，打造具有地标意义的文旅IP。包括城市节庆策划、文创产品开发、旅游线路规划等。", "Layers", 0i64),
            ("会务统筹", "Public Relations & Events", "提供全方位的活动策划与执行服务。商务会议、新品发布会、时尚秀场、企业年会等一站式解决方案。", "TrendingUp", 1),
            ("品牌策划", "Brand Strategy & Design", "为品牌提供从0到1的孵化与升级。品牌定位、VI视觉识别系统设计、营销策略制定、空间SI设计。", "Lightbulb", 2),
        ];
        for (title_cn, title_en, description, icon_name, order_index) in services {
            sqlx::query(
                "INSERT INTO services (title_cn, title_en, description, icon_name, order_index, created_at) \
                 VALUES (?, ?, ?, ?, ?, datetime('now'))",
            )
            .bind(title_cn)
            .bind(title_en)
            .bind(description)
            .bind(icon_name)
            .bind(order_index)
            .execute(pool)
            .await?;
        }
    }

    if table_is_empty(pool, "process_steps").await? {
        let steps = [
            ("01", "需求洞察", "深入沟通，精准定位核心诉求", 0i64),
            ("02", "策略规划", "定制化创意方案与执行路径", 1),
            ("03", "设计执行", "高标准视觉呈现与落地控场", 2),
            ("04", "复盘交付", "项目效果评估与持续优化", 3),
        ];
        for (number, title, description, order_index) in steps {
            sqlx::query(
                "INSERT INTO process_steps (number, title, description, order_index, created_at) \
                 VALUES (?, ?, ?, ?, datetime('now'))",
            )
            .bind(number)
            .bind(title)
            .bind(description)
            .bind(order_index)
            .execute(pool)
            .await?;
        }
    }

    if table_is_empty(pool, "cases").await? {
        let cases = [
            ("成渝地区双城经济", "Event / PR", "../assets/images/chengyu.png", "Chengdu, China", "2024", 0i64),
            ("人工影响天气技术交流会", "Exhibition", "../assets/images/rengong.png", "Chengdu, China", "2024", 1),
            ("生活垃圾分类宣传周", "Stage Design", "../assets/images/fenlei.png", "Chengdu, China", "2024", 2),
            ("LOOPY赞萌露比", "Brand Strategy", "../assets/images/looby.png", "Chengdu, China", "2025", 3),
            ("IFS-国庆限定市集", "Culture & Tourism", "../assets/images/ifs.png", "Chengdu, China", "2025", 4),
            ("宇宙尽头的派对", "Party", "../assets/images/universal.png", "Chengdu, China", "2025", 5),
        ];
        for (title, category, image, location, year, order_index) in cases {
            sqlx::query(
                "INSERT INTO cases (title, category, image, location, year, order_index) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(title)
            .bind(category)
            .bind(image)
            .bind(location)
            .bind(year)
            .bind(order_index)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

async fn table_is_empty(pool: &SqlitePool, table: &str) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    let count: (i64,) = sqlx::query_as(&sql).fetch_one(pool).await?;
    Ok(count.0 == 0)
}
