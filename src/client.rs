// src/client.rs

//! The `Lightning` facade.
//!
//! A client owns one backend and at most one current session. The session
//! is created on the first plotting call unless one was created or selected
//! explicitly, and every later visualization goes into it until another
//! session is requested. A client is meant to be used from one thread;
//! give each worker its own.

use std::rc::Rc;

use log::info;

use crate::backend::{Backend, LocalBackend, RemoteBackend};
use crate::config::{Config, Mode, CONFIG};
use crate::data::Data;
use crate::dispatch::{self, Target};
use crate::error::{Result, VizError};
use crate::plots::{
    Adjacency, Force, Gallery, Generic, Graph, GraphBundled, Image, ImagePoly, Line, LineStacked,
    LineStreaming, Matrix, Options, Particles, Plot, RegionMap, Scatter, ScatterLine,
    ScatterStreaming, Volume,
};
use crate::session::{Endpoint, Session};
use crate::visualization::Visualization;

pub struct Lightning {
    config: Config,
    backend: Rc<dyn Backend>,
    session: Option<Session>,
}

impl Lightning {
    /// Client configured from the process environment.
    pub fn new() -> Result<Self> {
        Self::with_config(CONFIG.clone())
    }

    /// Picks the remote or local backend according to `config.mode`.
    pub fn with_config(config: Config) -> Result<Self> {
        let backend: Rc<dyn Backend> = match config.mode {
            Mode::Remote => Rc::new(RemoteBackend::new(config.timeout())?),
            Mode::Local => Rc::new(LocalBackend::new(config.local.clone())),
        };
        Ok(Self::with_backend(config, backend))
    }

    pub fn with_backend(config: Config, backend: Rc<dyn Backend>) -> Self {
        Lightning {
            config,
            backend,
            session: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn is_local(&self) -> bool {
        self.backend.is_local()
    }

    // --- Sessions ---

    /// Creates a session and makes it current.
    pub fn create_session(&mut self, name: Option<&str>) -> Result<&Session> {
        let info = self
            .backend
            .create_session(&self.config.host, self.config.auth.as_ref(), name)?;
        let endpoint = Endpoint::new(&self.config.host, info.id, self.config.auth.clone());
        let name = info.name.or_else(|| name.map(str::to_string));
        Ok(&*self.session.insert(Session::new(endpoint, name)))
    }

    /// Makes an existing server session current without contacting the server.
    pub fn use_session(&mut self, id: impl Into<String>) -> &Session {
        let endpoint = Endpoint::new(&self.config.host, id, self.config.auth.clone());
        self.session.insert(Session::new(endpoint, None))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn ensure_session(&mut self) -> Result<&mut Session> {
        if self.session.is_none() {
            self.create_session(None)?;
        }
        self.session
            .as_mut()
            .ok_or_else(|| VizError::config("no active session"))
    }

    // --- Plotting ---

    /// Validates `plot` and `options`, then creates the visualization in the
    /// current session. Nothing is sent if validation fails.
    pub fn plot_with<P: Plot>(&mut self, plot: &P, options: Options) -> Result<Visualization> {
        let plot_type = plot.plot_type();
        let type_name = plot.type_name().to_string();
        let payload = plot.clean()?;
        let resolved = options.resolve(plot_type)?;

        let keyed = self.config.keyed_rows;
        let backend = Rc::clone(&self.backend);
        let session = self.ensure_session()?;
        let created = dispatch::create(
            backend.as_ref(),
            Target {
                session: session.endpoint(),
                type_name: &type_name,
                options: &resolved,
                description: options.get_description(),
                keyed,
            },
            payload,
        )?;
        session.record(&created.id);
        info!("created {type_name} visualization {} in session {session}", created.id);

        Ok(Visualization::new(
            created.id,
            &type_name,
            plot_type,
            session.endpoint().clone(),
            backend,
            created.html,
            keyed,
        ))
    }

    /// Sends a caller-built payload for any server-side plot type, skipping
    /// per-field validation.
    pub fn plot(&mut self, type_name: &str, data: impl Into<Data>) -> Result<Visualization> {
        self.plot_with(&Generic::new(type_name, data), Options::new())
    }
}

macro_rules! entry_points {
    ($($name:ident => $plot:ty),* $(,)?) => {
        impl Lightning {
            $(
                #[doc = concat!("Creates a `", stringify!($name), "` visualization.")]
                pub fn $name(&mut self, plot: $plot, options: Options) -> Result<Visualization> {
                    self.plot_with(&plot, options)
                }
            )*
        }

        /// Names of the typed plotting operations on [`Lightning`].
        pub const ENTRY_POINTS: &[&str] = &[$(stringify!($name)),*];
    };
}

entry_points! {
    scatter => Scatter,
    scatterstreaming => ScatterStreaming,
    line => Line,
    linestreaming => LineStreaming,
    linestacked => LineStacked,
    scatterline => ScatterLine,
    matrix => Matrix,
    adjacency => Adjacency,
    force => Force,
    graph => Graph,
    graphbundled => GraphBundled,
    map => RegionMap,
    particles => Particles,
    image => Image,
    gallery => Gallery,
    volume => Volume,
    imagepoly => ImagePoly,
}
