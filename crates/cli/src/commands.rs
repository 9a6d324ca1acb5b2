// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommands and their execution against a [`Gateway`].

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Subcommand;
use cinema_api::{
    AdminError, AdminSessionBoard, AuthError, AuthorizationService, BookingBoard, CancelError,
    Gateway, GatewayError, Identity, LoadOutcome, create_director, load_film_info, lookup_all,
};
use cinema_domain::{
    AdminDateMode, AdminSessionQuery, AdminSessionRow, BatchLookup, Clock, DateBucket, DateGroup,
    Director, DomainError, Film, FilmInfo, Hall, Locale, NewDirector, Session, StatusFilter,
    StatusScheme, count_sessions, films_in_bucket, group_by_date, nearest_session,
    search_directors, sessions_in_bucket,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::render;

/// Errors surfaced to the user by a subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("authentication expired, sign in again")]
    AuthExpired,

    #[error("--user-id is required for this command")]
    MissingUser,

    #[error("film {0} not found")]
    FilmNotFound(i64),

    #[error(transparent)]
    Gateway(GatewayError),

    #[error(transparent)]
    Cancel(#[from] CancelError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<GatewayError> for CliError {
    fn from(err: GatewayError) -> Self {
        if err.is_unauthorized() {
            Self::AuthExpired
        } else {
            Self::Gateway(err)
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// List the signed-in user's bookings
    #[command(visible_alias = "b")]
    Bookings {
        /// all, active, completed, cancelled, inactive or expired
        #[arg(long, default_value = "all")]
        filter: StatusFilter,

        /// collapsed (three statuses) or extended (five)
        #[arg(long, default_value = "collapsed")]
        scheme: StatusScheme,
    },

    /// Cancel one of the signed-in user's bookings
    Cancel {
        booking_id: i64,

        #[arg(long, default_value = "collapsed")]
        scheme: StatusScheme,
    },

    /// Films with sessions in a date bucket
    #[command(visible_alias = "h")]
    Home {
        /// today, tomorrow, week, upcoming or all
        #[arg(long, default_value = "today")]
        bucket: DateBucket,
    },

    /// One film's sessions grouped by day
    Film {
        film_id: i64,

        #[arg(long, default_value = "all")]
        bucket: DateBucket,
    },

    /// Admin session list
    AdminSessions {
        /// Only this film's sessions
        #[arg(long)]
        film_id: Option<i64>,

        /// all, today or week; ignored when --date is given
        #[arg(long, default_value = "all")]
        mode: AdminDateMode,

        /// Exact calendar date, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Exact session status, e.g. "Запланирован"
        #[arg(long)]
        status: Option<String>,

        /// Part of the film title
        #[arg(long)]
        film_name: Option<String>,

        /// Part of the hall name
        #[arg(long)]
        hall_name: Option<String>,
    },

    /// Delete a session (admin)
    DeleteSession { session_id: i64 },

    /// List directors (admin)
    Directors {
        /// Part of the director's name
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Add a director (admin)
    AddDirector {
        #[arg(long)]
        name: String,

        #[arg(long)]
        surname: String,

        /// YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<NaiveDate>,

        #[arg(long)]
        country_id: i64,
    },
}

const fn require_user(identity: &Identity) -> Result<i64, CliError> {
    if identity.user_id > 0 {
        Ok(identity.user_id)
    } else {
        Err(CliError::MissingUser)
    }
}

/// Runs one subcommand and returns its rendered output.
///
/// # Errors
///
/// Returns the subcommand's failure, with any 401 folded into
/// `CliError::AuthExpired`.
pub async fn run<G: Gateway>(
    command: Command,
    gateway: G,
    identity: &Identity,
    clock: &impl Clock,
    locale: Locale,
) -> Result<String, CliError> {
    match command {
        Command::Bookings { filter, scheme } => {
            bookings(gateway, identity, clock, filter, scheme, locale).await
        }
        Command::Cancel { booking_id, scheme } => {
            cancel(gateway, identity, clock, booking_id, scheme).await
        }
        Command::Home { bucket } => home(&gateway, clock, bucket).await,
        Command::Film { film_id, bucket } => film(&gateway, clock, film_id, bucket, locale).await,
        Command::AdminSessions {
            film_id,
            mode,
            date,
            status,
            film_name,
            hall_name,
        } => {
            let query: AdminSessionQuery = AdminSessionQuery {
                mode,
                date,
                status,
                film_name,
                hall_name,
            };
            admin_sessions(gateway, identity, clock, film_id, query).await
        }
        Command::DeleteSession { session_id } => {
            delete_session(gateway, identity, session_id).await
        }
        Command::Directors { search } => {
            let info: FilmInfo = load_film_info(&gateway, identity)
                .await
                .map_err(admin_error)?;
            let found: Vec<&Director> = search_directors(&info.directors, &search);
            Ok(render::render_directors(&found, &info.countries))
        }
        Command::AddDirector {
            name,
            surname,
            birth_date,
            country_id,
        } => {
            let form: NewDirector = NewDirector {
                name,
                surname,
                birth_date,
                country_id,
            };
            let director: Director = create_director(&gateway, identity, form, clock)
                .await
                .map_err(admin_error)?;
            Ok(format!(
                "Director #{} {} created\n",
                director.director_id, director.director_name_and_surname
            ))
        }
    }
}

async fn bookings<G: Gateway>(
    gateway: G,
    identity: &Identity,
    clock: &impl Clock,
    filter: StatusFilter,
    scheme: StatusScheme,
    locale: Locale,
) -> Result<String, CliError> {
    let user_id: i64 = require_user(identity)?;
    let board: BookingBoard<G> = BookingBoard::with_scheme(gateway, scheme);
    let outcome: LoadOutcome = board.load(user_id, clock).await?;
    debug!(?outcome, "Booking load finished");
    let visible = board.set_filter(filter).await;
    Ok(render::render_bookings(
        &visible,
        board.level().await,
        locale,
    ))
}

async fn cancel<G: Gateway>(
    gateway: G,
    identity: &Identity,
    clock: &impl Clock,
    booking_id: i64,
    scheme: StatusScheme,
) -> Result<String, CliError> {
    let user_id: i64 = require_user(identity)?;
    let board: BookingBoard<G> = BookingBoard::with_scheme(gateway, scheme);
    board.load(user_id, clock).await?;
    board.cancel(booking_id, clock).await.map_err(|err| match err {
        CancelError::AuthExpired => CliError::AuthExpired,
        other => CliError::Cancel(other),
    })?;
    Ok(format!("Booking #{booking_id} cancelled\n"))
}

async fn home<G: Gateway>(
    gateway: &G,
    clock: &impl Clock,
    bucket: DateBucket,
) -> Result<String, CliError> {
    let now: NaiveDateTime = clock.now();
    let films: Vec<Film> = gateway.list_active_films().await?;
    let counts: Vec<(DateBucket, usize)> = DateBucket::ALL
        .iter()
        .map(|b| (*b, count_sessions(&films, *b, now)))
        .collect();
    let listed: Vec<(&Film, Vec<&Session>)> = films_in_bucket(&films, bucket, now)
        .into_iter()
        .map(|film| (film, sessions_in_bucket(film, bucket, now)))
        .collect();
    info!(%bucket, films = listed.len(), "Home catalog loaded");
    Ok(render::render_home(&listed, bucket, &counts, now))
}

async fn film<G: Gateway>(
    gateway: &G,
    clock: &impl Clock,
    film_id: i64,
    bucket: DateBucket,
    locale: Locale,
) -> Result<String, CliError> {
    let now: NaiveDateTime = clock.now();
    let mut film: Film = gateway
        .get_film(film_id)
        .await?
        .ok_or(CliError::FilmNotFound(film_id))?;
    let (sessions, info) =
        tokio::join!(gateway.list_sessions(Some(film_id)), gateway.film_info());
    let sessions: Vec<Session> = sessions?;
    if !sessions.is_empty() {
        film.session_list = sessions;
    }
    let info: FilmInfo = match info {
        Ok(info) => info,
        Err(err) if err.is_unauthorized() => return Err(CliError::AuthExpired),
        Err(err) => {
            warn!(%err, "Director and country names are unavailable");
            FilmInfo::default()
        }
    };

    let hall_ids: Vec<i64> = film
        .session_list
        .iter()
        .map(|s| s.hall_id)
        .collect::<BTreeSet<i64>>()
        .into_iter()
        .collect();
    let halls: BatchLookup<Hall> = lookup_all("hall", &hall_ids, |id| gateway.get_hall(id)).await?;

    let groups: Vec<DateGroup<'_>> = group_by_date(&film, bucket, now);
    let nearest: Option<&Session> = nearest_session(&film.session_list, now);
    Ok(render::render_film(&film, &info, &groups, nearest, &halls, now, locale))
}

async fn admin_sessions<G: Gateway>(
    gateway: G,
    identity: &Identity,
    clock: &impl Clock,
    film_id: Option<i64>,
    query: AdminSessionQuery,
) -> Result<String, CliError> {
    AuthorizationService::authorize_admin(identity, "list_sessions")?;
    let board: AdminSessionBoard<G> = AdminSessionBoard::new(gateway);
    board.load(film_id).await?;
    board.set_query(query).await;
    let rows: Vec<AdminSessionRow> = board.visible(clock).await;
    Ok(render::render_admin_sessions(&rows))
}

async fn delete_session<G: Gateway>(
    gateway: G,
    identity: &Identity,
    session_id: i64,
) -> Result<String, CliError> {
    AuthorizationService::authorize_admin(identity, "delete_session")?;
    let board: AdminSessionBoard<G> = AdminSessionBoard::new(gateway);
    board.load(None).await?;
    board
        .delete_session(identity, session_id)
        .await
        .map_err(admin_error)?;
    Ok(format!("Session #{session_id} deleted\n"))
}

fn admin_error(err: AdminError) -> CliError {
    match err {
        AdminError::AuthExpired => CliError::AuthExpired,
        other => CliError::Admin(other),
    }
}
