//! Seed dataset: a realistic small fleet for demos and manual testing
//!
//! Roughly ten terminals across Curitiba and São Paulo with coordinates and
//! CEPs, a media library covering every asset type, a few groups, five
//! partnerships spread over the pipeline, pre-populated playlists for two
//! screens, and the fixed dashboard chart series.

use chrono::{Duration, Utc};
use signcast_common::types::{
    default_item_duration, AddressDetails, Coordinates, Demographics, Group, Media,
    MediaOrientation, MediaStatus, MediaType, OperatingHours, Partnership, PartnershipStage,
    PartnershipTask, Phones, Playlist, ScreenConfig, ScreenStatus, ScreenSummary, ScreenType,
    SiteGallery, SocialClass, Terminal, TerminalCategory, TerminalMetrics, TerminalStatus, WeekDay,
};
use uuid::Uuid;

use super::core::StoreInner;
use super::dashboard::{DayHealth, WeekComparison};

pub(super) fn seed() -> StoreInner {
    let mut inner = StoreInner::default();
    seed_terminals(&mut inner);
    seed_media(&mut inner);
    seed_playlists(&mut inner);
    seed_groups(&mut inner);
    seed_partnerships(&mut inner);
    seed_dashboard_series(&mut inner);
    inner
}

fn screen(
    name: &str,
    screen_type: ScreenType,
    status: ScreenStatus,
    synced_days_ago: Option<i64>,
) -> ScreenConfig {
    ScreenConfig {
        id: Uuid::new_v4(),
        name: name.to_string(),
        screen_type,
        update_cycle_minutes: 30,
        audio_enabled: matches!(screen_type, ScreenType::Led),
        timezone: "America/Sao_Paulo".to_string(),
        footer_enabled: true,
        status,
        last_synced_at: synced_days_ago.map(|d| Utc::now() - Duration::days(d)),
    }
}

#[allow(clippy::too_many_arguments)]
fn terminal(
    name: &str,
    address: &str,
    neighborhood: &str,
    city: &str,
    state: &str,
    category: TerminalCategory,
    status: TerminalStatus,
    cep: &str,
    coordinates: Option<(f64, f64)>,
    metrics: Option<(u64, u8)>,
    screens: Vec<ScreenConfig>,
) -> Terminal {
    let mut t = Terminal {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: address.to_string(),
        neighborhood: neighborhood.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        category,
        status,
        screens: ScreenSummary::default(),
        image_url: None,
        last_connection: match status {
            TerminalStatus::Online => Some(Utc::now() - Duration::minutes(3)),
            TerminalStatus::Offline => Some(Utc::now() - Duration::days(2)),
            TerminalStatus::Maintenance => Some(Utc::now() - Duration::hours(8)),
        },
        is_favorite: false,
        coordinates: coordinates.map(|(latitude, longitude)| Coordinates {
            latitude,
            longitude,
        }),
        cep: Some(cep.to_string()),
        address_details: None,
        phones: None,
        operating_hours: None,
        demographics: None,
        media: None,
        screen_configs: screens,
        metrics: metrics.map(|(exhibitions, uptime_pct)| TerminalMetrics {
            exhibitions,
            uptime_pct,
        }),
    };
    t.recompute_screen_summary();
    t
}

fn seed_terminals(inner: &mut StoreInner) {
    let mut farmacia = terminal(
        "Farmácia Santa Clara",
        "Rua XV de Novembro, 1500",
        "Centro",
        "Curitiba",
        "PR",
        TerminalCategory::Pharmacy,
        TerminalStatus::Online,
        "80020-310",
        Some((-25.4284, -49.2733)),
        Some((5420, 98)),
        vec![
            screen("Balcão", ScreenType::TvHorizontal, ScreenStatus::Active, Some(1)),
            screen("Vitrine", ScreenType::TvVertical, ScreenStatus::Active, Some(3)),
        ],
    );
    farmacia.address_details = Some(AddressDetails {
        street: "Rua XV de Novembro".to_string(),
        number: "1500".to_string(),
        complement: Some("Loja 2".to_string()),
        zip_code: "80020-310".to_string(),
    });
    farmacia.phones = Some(Phones {
        primary: Some("(41) 9 9876-5432".to_string()),
        secondary: None,
    });
    farmacia.operating_hours = Some(OperatingHours {
        start: "08:00".to_string(),
        end: "20:00".to_string(),
        work_days: vec![
            WeekDay::Monday,
            WeekDay::Tuesday,
            WeekDay::Wednesday,
            WeekDay::Thursday,
            WeekDay::Friday,
            WeekDay::Saturday,
        ],
    });
    farmacia.demographics = Some(Demographics {
        average_foot_traffic: 450,
        social_class: vec![SocialClass::B, SocialClass::C],
    });
    farmacia.media = Some(SiteGallery {
        images: vec!["https://images.signcast.example/farmacia-santa-clara.jpg".to_string()],
        videos: None,
    });
    farmacia.image_url =
        Some("https://images.signcast.example/farmacia-santa-clara.jpg".to_string());

    let mut mercado = terminal(
        "Mercado Bom Preço",
        "Av. do Batel, 1868",
        "Batel",
        "Curitiba",
        "PR",
        TerminalCategory::Supermarket,
        TerminalStatus::Online,
        "80420-090",
        Some((-25.4411, -49.2880)),
        Some((4830, 95)),
        vec![
            screen("Painel Entrada", ScreenType::Led, ScreenStatus::Active, Some(1)),
            screen("Açougue", ScreenType::TvHorizontal, ScreenStatus::Inactive, None),
        ],
    );
    mercado.is_favorite = true;
    mercado.demographics = Some(Demographics {
        average_foot_traffic: 1200,
        social_class: vec![SocialClass::A, SocialClass::B],
    });

    let padaria = terminal(
        "Padaria Pão Dourado",
        "Av. República Argentina, 452",
        "Água Verde",
        "Curitiba",
        "PR",
        TerminalCategory::Bakery,
        TerminalStatus::Offline,
        "80240-210",
        Some((-25.4550, -49.2830)),
        Some((3720, 82)),
        vec![screen("Caixa", ScreenType::TvVertical, ScreenStatus::Active, Some(9))],
    );

    let mut academia = terminal(
        "Academia Corpo em Forma",
        "Rua Padre Anchieta, 2050",
        "Bigorrilho",
        "Curitiba",
        "PR",
        TerminalCategory::Gym,
        TerminalStatus::Online,
        "80730-000",
        Some((-25.4350, -49.3010)),
        Some((4150, 94)),
        vec![
            screen("Recepção", ScreenType::TvHorizontal, ScreenStatus::Active, Some(2)),
            screen("Sala de Musculação", ScreenType::TvHorizontal, ScreenStatus::Active, Some(2)),
        ],
    );
    academia.is_favorite = true;

    let shopping = terminal(
        "Shopping Estação",
        "Av. Sete de Setembro, 2775",
        "Rebouças",
        "Curitiba",
        "PR",
        TerminalCategory::Mall,
        TerminalStatus::Maintenance,
        "80230-010",
        Some((-25.4430, -49.2650)),
        Some((3980, 97)),
        vec![
            screen("Praça de Alimentação", ScreenType::Led, ScreenStatus::Active, Some(5)),
            screen("Corredor Norte", ScreenType::TvVertical, ScreenStatus::Active, Some(5)),
            screen("Corredor Sul", ScreenType::TvVertical, ScreenStatus::Inactive, None),
        ],
    );

    let supermercado = terminal(
        "Supermercado Família",
        "Rua Carlos Klemtz, 1700",
        "Portão",
        "Curitiba",
        "PR",
        TerminalCategory::Supermarket,
        TerminalStatus::Online,
        "81070-000",
        Some((-25.4780, -49.2920)),
        Some((2850, 91)),
        vec![screen("Hortifruti", ScreenType::TvHorizontal, ScreenStatus::Active, Some(4))],
    );

    let farmacia_sp = terminal(
        "Farmácia Avenida",
        "Rua dos Pinheiros, 870",
        "Pinheiros",
        "São Paulo",
        "SP",
        TerminalCategory::Pharmacy,
        TerminalStatus::Online,
        "05422-010",
        Some((-23.5614, -46.7011)),
        Some((3310, 93)),
        vec![screen("Balcão", ScreenType::TvHorizontal, ScreenStatus::Active, Some(1))],
    );

    let pet_shop = terminal(
        "Pet Shop Amigo Fiel",
        "Av. Moema, 340",
        "Moema",
        "São Paulo",
        "SP",
        TerminalCategory::PetShop,
        TerminalStatus::Offline,
        "04077-020",
        Some((-23.6040, -46.6640)),
        Some((1980, 76)),
        vec![screen("Vitrine", ScreenType::TvVertical, ScreenStatus::Inactive, None)],
    );

    let clinica = terminal(
        "Clínica Vida",
        "Rua Direita, 250",
        "Centro",
        "São Paulo",
        "SP",
        TerminalCategory::MedicalClinic,
        TerminalStatus::Online,
        "01010-010",
        Some((-23.5475, -46.6361)),
        Some((2540, 89)),
        vec![screen("Sala de Espera", ScreenType::TvHorizontal, ScreenStatus::Active, Some(6))],
    );

    let loterica = terminal(
        "Lotérica da Sorte",
        "Via Vêneto, 510",
        "Santa Felicidade",
        "Curitiba",
        "PR",
        TerminalCategory::LotteryShop,
        TerminalStatus::Online,
        "82020-000",
        Some((-25.4080, -49.3330)),
        Some((1650, 88)),
        vec![screen("Fila", ScreenType::TvVertical, ScreenStatus::Active, Some(12))],
    );

    inner.terminals = vec![
        farmacia,
        mercado,
        padaria,
        academia,
        shopping,
        supermercado,
        farmacia_sp,
        pet_shop,
        clinica,
        loterica,
    ];
}

fn media_asset(
    name: &str,
    media_type: MediaType,
    category: TerminalCategory,
    orientation: MediaOrientation,
    status: MediaStatus,
    duration_secs: Option<u32>,
    days_old: i64,
) -> Media {
    let created = Utc::now() - Duration::days(days_old);
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>();
    Media {
        id: Uuid::new_v4(),
        name: name.to_string(),
        media_type,
        category,
        orientation,
        file_url: format!("https://media.signcast.example/{}.bin", slug),
        thumbnail_url: format!("https://media.signcast.example/{}-thumb.jpg", slug),
        created_at: created,
        updated_at: created,
        status,
        duration_secs,
        terminals: Vec::new(),
        collect_stats: false,
        views: None,
        author: None,
        description: None,
        youtube_id: None,
        schedule_start: None,
        schedule_end: None,
    }
}

fn seed_media(inner: &mut StoreInner) {
    let terminal_ids: Vec<Uuid> = inner.terminals.iter().map(|t| t.id).collect();

    let mut promo = media_asset(
        "Promoção de Verão",
        MediaType::Video,
        TerminalCategory::Supermarket,
        MediaOrientation::Horizontal,
        MediaStatus::Active,
        Some(30),
        40,
    );
    promo.terminals = terminal_ids.iter().take(3).copied().collect();
    promo.views = Some(18_430);
    promo.collect_stats = true;
    promo.author = Some("Equipe Comercial".to_string());

    let mut institucional = media_asset(
        "Institucional da Rede",
        MediaType::Video,
        TerminalCategory::Pharmacy,
        MediaOrientation::Both,
        MediaStatus::Active,
        Some(45),
        90,
    );
    institucional.views = Some(9_812);
    institucional.terminals = vec![terminal_ids[0], terminal_ids[6]];

    let banner = media_asset(
        "Banner Ofertas da Semana",
        MediaType::Image,
        TerminalCategory::Supermarket,
        MediaOrientation::Horizontal,
        MediaStatus::Active,
        None,
        7,
    );

    let tabela = media_asset(
        "Tabela de Serviços",
        MediaType::Pdf,
        TerminalCategory::Pharmacy,
        MediaOrientation::Vertical,
        MediaStatus::Active,
        None,
        21,
    );

    let mut clipe = media_asset(
        "Clipe de Lançamento",
        MediaType::Youtube,
        TerminalCategory::Other,
        MediaOrientation::Both,
        MediaStatus::Active,
        Some(212),
        14,
    );
    clipe.youtube_id = Some("dQw4w9WgXcQ".to_string());

    let spot = media_asset(
        "Spot Rádio Interno",
        MediaType::Audio,
        TerminalCategory::Supermarket,
        MediaOrientation::Both,
        MediaStatus::Active,
        Some(20),
        30,
    );

    let mut maes = media_asset(
        "Campanha Dia das Mães",
        MediaType::Video,
        TerminalCategory::ClothingStore,
        MediaOrientation::Vertical,
        MediaStatus::Scheduled,
        Some(25),
        3,
    );
    maes.schedule_start = Some(Utc::now() + Duration::days(10));
    maes.schedule_end = Some(Utc::now() + Duration::days(24));

    let aviso = media_asset(
        "Aviso de Funcionamento",
        MediaType::Image,
        TerminalCategory::Other,
        MediaOrientation::Both,
        MediaStatus::Inactive,
        Some(8),
        120,
    );

    inner.media = vec![
        promo,
        institucional,
        banner,
        tabela,
        clipe,
        spot,
        maes,
        aviso,
    ];
}

fn seed_playlists(inner: &mut StoreInner) {
    // Every configured screen gets a playlist entry; two get content
    for t in &inner.terminals {
        for s in &t.screen_configs {
            inner.playlists.insert(s.id, Playlist::new());
        }
    }

    let promo = &inner.media[0];
    let institucional = &inner.media[1];
    let banner = &inner.media[2];
    let spot = &inner.media[5];

    // Farmácia Santa Clara, balcão screen
    let balcao = inner.terminals[0].screen_configs[0].id;
    let mut playlist = Playlist::new();
    playlist.append(
        institucional.id,
        default_item_duration(institucional.media_type, institucional.duration_secs),
    );
    playlist.append(
        banner.id,
        default_item_duration(banner.media_type, banner.duration_secs),
    );
    playlist.append(
        promo.id,
        default_item_duration(promo.media_type, promo.duration_secs),
    );
    inner.playlists.insert(balcao, playlist);

    // Mercado Bom Preço, LED entrance panel
    let painel = inner.terminals[1].screen_configs[0].id;
    let mut playlist = Playlist::new();
    playlist.append(
        promo.id,
        default_item_duration(promo.media_type, promo.duration_secs),
    );
    playlist.append(
        spot.id,
        default_item_duration(spot.media_type, spot.duration_secs),
    );
    inner.playlists.insert(painel, playlist);
}

fn seed_groups(inner: &mut StoreInner) {
    let now = Utc::now();
    let media = &inner.media;

    inner.groups = vec![
        Group {
            id: Uuid::new_v4(),
            name: "Campanha Verão".to_string(),
            description: Some("Conteúdo sazonal da campanha de verão".to_string()),
            cover_image: Some(media[0].thumbnail_url.clone()),
            media_ids: vec![media[0].id, media[2].id, media[5].id],
            created_at: now - Duration::days(35),
            updated_at: now - Duration::days(2),
            view_count: Some(32_150),
        },
        Group {
            id: Uuid::new_v4(),
            name: "Conteúdo Institucional".to_string(),
            description: None,
            cover_image: None,
            media_ids: vec![media[1].id, media[3].id],
            created_at: now - Duration::days(80),
            updated_at: now - Duration::days(80),
            view_count: Some(12_040),
        },
        Group {
            id: Uuid::new_v4(),
            name: "Datas Comemorativas".to_string(),
            description: Some("Campanhas por data comemorativa".to_string()),
            cover_image: None,
            media_ids: vec![media[6].id],
            created_at: now - Duration::days(5),
            updated_at: now - Duration::days(5),
            view_count: None,
        },
    ];
}

fn seed_partnerships(inner: &mut StoreInner) {
    let now = Utc::now();

    let make = |company: &str,
                contact: &str,
                city: &str,
                state: &str,
                category: &str,
                potential: u32,
                stage: PartnershipStage,
                days_in_stage: i64,
                assigned: &str| Partnership {
        id: Uuid::new_v4(),
        company_name: company.to_string(),
        contact_name: contact.to_string(),
        contact_email: format!(
            "{}@{}.com.br",
            contact.split_whitespace().next().unwrap_or("contato").to_lowercase(),
            company
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        ),
        contact_phone: "(41) 9 9999-1234".to_string(),
        address: "Rua das Araucárias, 45".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        category: category.to_string(),
        potential_screens: potential,
        stage,
        stage_updated_at: now - Duration::days(days_in_stage),
        notes: String::new(),
        created_at: now - Duration::days(days_in_stage + 20),
        updated_at: now - Duration::days(days_in_stage),
        assigned_to: assigned.to_string(),
        tasks: Vec::new(),
    };

    let mut analysis = make(
        "Rede Droga Mais",
        "Fernanda Costa",
        "Curitiba",
        "PR",
        "Pharmacy",
        12,
        PartnershipStage::Analysis,
        2,
        "Carlos Lima",
    );
    analysis.notes = "Indicação do parceiro da unidade Batel.".to_string();

    let mut visit = make(
        "Hortifruti do Bairro",
        "João Pereira",
        "Curitiba",
        "PR",
        "Grocer",
        3,
        PartnershipStage::Visit,
        5,
        "Carlos Lima",
    );
    visit.tasks.push(PartnershipTask {
        id: Uuid::new_v4(),
        partnership_id: visit.id,
        title: "Agendar visita técnica".to_string(),
        description: "Confirmar horário com o gerente da loja".to_string(),
        due_date: now + Duration::days(3),
        completed: false,
        created_at: now - Duration::days(1),
        updated_at: now - Duration::days(1),
    });

    let negotiation = make(
        "Academia Energia Total",
        "Patrícia Ramos",
        "São Paulo",
        "SP",
        "Gym",
        6,
        PartnershipStage::Negotiation,
        9,
        "Beatriz Nunes",
    );

    let installation = make(
        "Supermercados União",
        "Ricardo Alves",
        "São Paulo",
        "SP",
        "Supermarket",
        18,
        PartnershipStage::Installation,
        1,
        "Beatriz Nunes",
    );

    let closed = make(
        "Padaria Estrela do Sul",
        "Marcos Vinícius",
        "Curitiba",
        "PR",
        "Bakery",
        2,
        PartnershipStage::Closed,
        30,
        "Carlos Lima",
    );

    inner.partnerships = vec![analysis, visit, negotiation, installation, closed];
}

fn seed_dashboard_series(inner: &mut StoreInner) {
    let weekly = [
        ("Mon", 98, 120),
        ("Tue", 95, 132),
        ("Wed", 99, 145),
        ("Thu", 97, 130),
        ("Fri", 96, 142),
        ("Sat", 94, 115),
        ("Sun", 92, 102),
    ];
    inner.weekly_health = weekly
        .iter()
        .map(|(day, uptime_pct, exhibitions)| DayHealth {
            day: day.to_string(),
            uptime_pct: *uptime_pct,
            exhibitions: *exhibitions,
        })
        .collect();

    let monthly = [
        ("Week 1", 4000, 3500),
        ("Week 2", 4200, 3800),
        ("Week 3", 5800, 4200),
        ("Week 4", 6000, 5000),
    ];
    inner.monthly_exhibitions = monthly
        .iter()
        .map(|(week, current, previous)| WeekComparison {
            week: week.to_string(),
            current: *current,
            previous: *previous,
        })
        .collect();
}
