//! Per-request descriptors
//!
//! A [`Call`] is built by a façade method, adjusted with option setters and
//! then executed once with [`Call::send`]. The endpoint marker `E` fixes both
//! the decoded output type and which options are available, so asking for an
//! output size on a weekly series simply does not compile.

use crate::client::AlphaVantageClient;
use crate::response::{check_response, server_response};
use crate::transport::RawResponse;
use av_core::{DataType, Error, FuncType, OutputSize, Result, SeriesType, TechnicalIndicator};
use av_models::{
  FxSeriesList, IndicatorSeries, Quote, SearchResultList, SectorPerformance, TimeSeriesList,
  decode_csv, decode_csv_in, decode_indicator_csv_in, decode_sector_json, market_tz,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Request};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Query parameters of a call, kept sorted by name
pub type Params = BTreeMap<&'static str, String>;

/// What an endpoint returns and how its body is decoded
pub trait Endpoint {
  /// Record type a successful call resolves to
  type Output;

  /// `datatype` sent with every request; `None` for JSON-only functions
  const DATA_TYPE: Option<DataType> = Some(DataType::Csv);

  /// Decode a response that already passed validation.
  ///
  /// `function` decides the zone timestamps are read in.
  fn decode(function: FuncType, params: &Params, response: RawResponse) -> Result<Self::Output>;
}

/// Endpoints that accept `outputsize`
pub trait SupportsOutputSize: Endpoint {}

/// Equity and crypto series without an output size
pub enum Series {}
/// Equity and crypto series that take an output size
pub enum SizedSeries {}
/// `TIME_SERIES_INTRADAY`
pub enum IntradaySeries {}
/// `GLOBAL_QUOTE`
pub enum QuoteLookup {}
/// `SYMBOL_SEARCH`
pub enum SymbolSearch {}
/// Weekly and monthly FX series
pub enum FxSeries {}
/// Intraday and daily FX series
pub enum SizedFxSeries {}
/// Any technical indicator
pub enum IndicatorValues {}
/// `SECTOR`
pub enum SectorRanks {}

fn decode_series(function: FuncType, response: RawResponse) -> Result<TimeSeriesList> {
  Ok(TimeSeriesList {
    server_response: server_response(&response),
    time_series: decode_csv_in(&response.body, market_tz(function))?,
  })
}

fn decode_fx(function: FuncType, response: RawResponse) -> Result<FxSeriesList> {
  Ok(FxSeriesList {
    server_response: server_response(&response),
    bars: decode_csv_in(&response.body, market_tz(function))?,
  })
}

macro_rules! series_endpoint {
  ($marker:ty, $output:ty, $decode:ident) => {
    impl Endpoint for $marker {
      type Output = $output;

      fn decode(function: FuncType, _params: &Params, response: RawResponse) -> Result<Self::Output> {
        $decode(function, response)
      }
    }
  };
}

series_endpoint!(Series, TimeSeriesList, decode_series);
series_endpoint!(SizedSeries, TimeSeriesList, decode_series);
series_endpoint!(IntradaySeries, TimeSeriesList, decode_series);
series_endpoint!(FxSeries, FxSeriesList, decode_fx);
series_endpoint!(SizedFxSeries, FxSeriesList, decode_fx);

impl SupportsOutputSize for SizedSeries {}
impl SupportsOutputSize for IntradaySeries {}
impl SupportsOutputSize for SizedFxSeries {}

impl Endpoint for QuoteLookup {
  type Output = Quote;

  fn decode(_function: FuncType, params: &Params, response: RawResponse) -> Result<Quote> {
    let mut quote = decode_csv::<Quote>(&response.body)?.into_iter().next().ok_or_else(|| {
      Error::NotFound(params.get("symbol").cloned().unwrap_or_default())
    })?;
    quote.server_response = server_response(&response);
    Ok(quote)
  }
}

impl Endpoint for SymbolSearch {
  type Output = SearchResultList;

  fn decode(_function: FuncType, _params: &Params, response: RawResponse) -> Result<SearchResultList> {
    Ok(SearchResultList {
      server_response: server_response(&response),
      search_results: decode_csv(&response.body)?,
    })
  }
}

impl Endpoint for IndicatorValues {
  type Output = IndicatorSeries;

  fn decode(function: FuncType, params: &Params, response: RawResponse) -> Result<IndicatorSeries> {
    Ok(IndicatorSeries {
      server_response: server_response(&response),
      indicator: params.get("function").cloned().unwrap_or_default(),
      points: decode_indicator_csv_in(&response.body, market_tz(function))?,
    })
  }
}

impl Endpoint for SectorRanks {
  type Output = SectorPerformance;
  const DATA_TYPE: Option<DataType> = None;

  fn decode(_function: FuncType, _params: &Params, response: RawResponse) -> Result<SectorPerformance> {
    decode_sector_json(&response.body, server_response(&response))
  }
}

/// One unexecuted request against a single API function
pub struct Call<E> {
  client: AlphaVantageClient,
  function: FuncType,
  params: Params,
  headers: HeaderMap,
  timeout: Option<Duration>,
  _endpoint: PhantomData<fn() -> E>,
}

impl<E: Endpoint> Call<E> {
  pub(crate) fn new(client: &AlphaVantageClient, function: FuncType) -> Self {
    let mut params = Params::new();
    params.insert("function", function.to_string());
    if let Some(data_type) = E::DATA_TYPE {
      params.insert("datatype", data_type.to_string());
    }

    Self {
      client: client.clone(),
      function,
      params,
      headers: HeaderMap::new(),
      timeout: None,
      _endpoint: PhantomData,
    }
  }

  pub(crate) fn param(mut self, key: &'static str, value: impl ToString) -> Self {
    self.params.insert(key, value.to_string());
    self
  }

  /// The API function this call targets
  pub fn function(&self) -> FuncType {
    self.function
  }

  /// Query parameters accumulated so far (the API key is not among them)
  pub fn params(&self) -> &Params {
    &self.params
  }

  /// Add a request header, replacing any previous value for `name`
  pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
    self.headers.insert(name, value);
    self
  }

  /// Deadline for this request only. It replaces the client-wide timeout
  /// rather than adding to it, so it may be longer or shorter.
  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  /// Fully resolved request URL, without the API key. Does no I/O.
  pub fn url(&self) -> Url {
    let mut url = self.client.base_url().clone();
    url.set_query(None);
    url.query_pairs_mut().extend_pairs(self.params.iter());
    url
  }

  fn request(&self) -> Request {
    let mut request = Request::new(Method::GET, self.url());
    *request.headers_mut() = self.headers.clone();
    if !request.headers().contains_key(USER_AGENT) {
      request.headers_mut().insert(USER_AGENT, self.client.user_agent_header().clone());
    }
    *request.timeout_mut() = self.timeout;
    request
  }

  /// Execute the request and decode the response.
  ///
  /// # Errors
  ///
  /// * [`Error::Transport`] if the request never got a response
  /// * [`Error::NotModified`] on `304`
  /// * [`Error::Api`] on a non-2xx status or an error envelope in the body
  /// * [`Error::Decode`] if the body does not match the expected records
  /// * [`Error::NotFound`] if a quote came back with no rows
  #[instrument(skip(self), fields(function = %self.function))]
  pub async fn send(self) -> Result<E::Output> {
    let request = self.request();
    debug!(url = %request.url(), "sending request");

    let response = self.client.transport().round_trip(request).await?;
    check_response(&response)?;

    E::decode(self.function, &self.params, response)
  }
}

impl<E: SupportsOutputSize> Call<E> {
  /// `compact` (latest 100 points, the server default) or `full` history
  pub fn output_size(self, size: OutputSize) -> Self {
    self.param("outputsize", size)
  }
}

impl Call<IntradaySeries> {
  /// Whether bars are split/dividend adjusted (server default `true`)
  pub fn adjusted(self, adjusted: bool) -> Self {
    self.param("adjusted", adjusted)
  }

  /// Include pre- and post-market bars (server default `true`)
  pub fn extended_hours(self, extended_hours: bool) -> Self {
    self.param("extended_hours", extended_hours)
  }

  /// Query a historical month, formatted `YYYY-MM`
  pub fn month(self, month: impl Into<String>) -> Self {
    self.param("month", month.into())
  }
}

impl Call<IndicatorValues> {
  fn indicator(&self) -> Option<TechnicalIndicator> {
    match self.function {
      FuncType::Indicator(indicator) => Some(indicator),
      _ => None,
    }
  }

  /// Number of data points used for each value.
  ///
  /// Dropped for indicators that have no such parameter (`VWAP`, `MACD`, ...).
  pub fn time_period(self, period: u32) -> Self {
    match self.indicator() {
      Some(indicator) if !indicator.takes_time_period() => {
        debug!(%indicator, "indicator takes no time_period, ignoring");
        self
      }
      _ => self.param("time_period", period),
    }
  }

  /// Price column the indicator is computed over.
  ///
  /// Dropped for indicators computed from the full bar (`STOCH`, `ADX`, ...).
  pub fn series_type(self, series_type: SeriesType) -> Self {
    match self.indicator() {
      Some(indicator) if !indicator.takes_series_type() => {
        debug!(%indicator, "indicator takes no series_type, ignoring");
        self
      }
      _ => self.param("series_type", series_type),
    }
  }
}

impl<E> Clone for Call<E> {
  fn clone(&self) -> Self {
    Self {
      client: self.client.clone(),
      function: self.function,
      params: self.params.clone(),
      headers: self.headers.clone(),
      timeout: self.timeout,
      _endpoint: PhantomData,
    }
  }
}

impl<E> fmt::Debug for Call<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Call")
      .field("function", &self.function)
      .field("params", &self.params)
      .field("timeout", &self.timeout)
      .finish_non_exhaustive()
  }
}
