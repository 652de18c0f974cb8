use clap::Args;
use flipmatch_core::{
    Conversion, ConverterError, Currency, CurrencyApi, DEFAULT_API_URL, find_currency,
    format_conversion, parse_amount,
};
use gloo::net::http::Request;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

async fn fetch_text(url: &str) -> Result<String, gloo::net::Error> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(gloo::net::Error::GlooError(format!(
            "{} responded with {}",
            url,
            response.status()
        )));
    }
    response.text().await
}

async fn load_currencies(api: &CurrencyApi) -> Result<Vec<Currency>, ConverterError> {
    let body = fetch_text(&api.currencies_url()).await.map_err(|err| {
        log::error!("could not fetch currencies: {}", err);
        ConverterError::FetchCurrencies
    })?;
    CurrencyApi::parse_currencies(&body)
}

async fn convert(
    api: &CurrencyApi,
    amount: f64,
    from: &Currency,
    to: &Currency,
) -> Result<f64, ConverterError> {
    match api.plan_conversion(amount, from, to) {
        Conversion::Identity(amount) => Ok(amount),
        Conversion::Fetch { url } => {
            let body = fetch_text(&url).await.map_err(|err| {
                log::error!("could not convert {} to {}: {}", from.code, to.code, err);
                ConverterError::Convert
            })?;
            CurrencyApi::parse_rate(&body, to)
        }
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct ConverterProps {
    /// Base URL of the exchange-rate service
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CurrenciesLoaded(Result<Vec<Currency>, ConverterError>),
    SetAmount(String),
    SetFrom(String),
    SetTo(String),
    Submit,
    Converted(Result<String, ConverterError>),
}

#[derive(Debug)]
pub(crate) struct ConverterView {
    api: CurrencyApi,
    currencies: Vec<Currency>,
    amount: String,
    from: String,
    to: String,
    result: Option<String>,
    loading: bool,
}

impl ConverterView {
    /// Validates the form and starts the request, the answer comes back as [`Msg::Converted`].
    fn submit(&mut self, ctx: &Context<Self>) {
        self.result = None;

        let request = parse_amount(&self.amount).and_then(|amount| {
            let from = find_currency(&self.currencies, &self.from)
                .ok_or_else(|| ConverterError::UnknownCurrency(self.from.clone()))?;
            let to = find_currency(&self.currencies, &self.to)
                .ok_or_else(|| ConverterError::UnknownCurrency(self.to.clone()))?;
            Ok((amount, from.clone(), to.clone()))
        });
        let (amount, from, to) = match request {
            Ok(request) => request,
            Err(err) => {
                log::debug!("conversion not sent: {:?}", err);
                self.result = Some(err.to_string());
                return;
            }
        };

        self.loading = true;
        let api = self.api.clone();
        let link = ctx.link().clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = convert(&api, amount, &from, &to)
                .await
                .map(|converted| format_conversion(amount, &from, &to, converted));
            link.send_message(Msg::Converted(result));
        });
    }

    fn currency_options(&self, selected: &str) -> Html {
        html! {
            <>
                {
                    for self.currencies.iter().map(|currency| html! {
                        <option value={currency.code.clone()} selected={currency.code == selected}>
                            {currency.to_string()}
                        </option>
                    })
                }
            </>
        }
    }
}

impl Component for ConverterView {
    type Message = Msg;
    type Properties = ConverterProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api = CurrencyApi::new(ctx.props().api_url.clone());
        log::debug!("exchange-rate service: {}", api.base_url());

        {
            let api = api.clone();
            let link = ctx.link().clone();
            wasm_bindgen_futures::spawn_local(async move {
                link.send_message(Msg::CurrenciesLoaded(load_currencies(&api).await));
            });
        }

        Self {
            api,
            currencies: Vec::new(),
            amount: String::new(),
            from: String::new(),
            to: String::new(),
            result: None,
            loading: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CurrenciesLoaded(Ok(currencies)) => {
                log::debug!("loaded {} currencies", currencies.len());
                if let Some(first) = currencies.first() {
                    self.from = first.code.clone();
                    self.to = first.code.clone();
                }
                self.currencies = currencies;
                true
            }
            CurrenciesLoaded(Err(err)) => {
                self.result = Some(err.to_string());
                true
            }
            SetAmount(amount) => {
                self.amount = amount;
                false
            }
            SetFrom(code) => {
                self.from = code;
                false
            }
            SetTo(code) => {
                self.to = code;
                false
            }
            Submit => {
                self.submit(ctx);
                true
            }
            Converted(result) => {
                self.loading = false;
                self.result = Some(result.unwrap_or_else(|err| err.to_string()));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Submit
        });
        let oninput = ctx
            .link()
            .callback(|e: InputEvent| SetAmount(e.target_unchecked_into::<HtmlInputElement>().value()));
        let on_from = ctx
            .link()
            .callback(|e: Event| SetFrom(e.target_unchecked_into::<HtmlSelectElement>().value()));
        let on_to = ctx
            .link()
            .callback(|e: Event| SetTo(e.target_unchecked_into::<HtmlSelectElement>().value()));
        let loading_style = if self.loading {
            "display: block"
        } else {
            "display: none"
        };

        html! {
            <div class="converter">
                <form id="conversion-form" {onsubmit}>
                    <input
                        id="amount"
                        class="input"
                        type="number"
                        step="any"
                        required={true}
                        value={self.amount.clone()}
                        {oninput}
                    />
                    <div class="select">
                        <select id="from-currency" onchange={on_from}>
                            {self.currency_options(&self.from)}
                        </select>
                    </div>
                    <div class="select">
                        <select id="to-currency" onchange={on_to}>
                            {self.currency_options(&self.to)}
                        </select>
                    </div>
                    <button type="submit" class="button" disabled={self.loading}>{"Convert"}</button>
                </form>
                <div id="loading" style={loading_style}>{"Loading..."}</div>
                <div id="result">{self.result.clone().unwrap_or_default()}</div>
            </div>
        }
    }
}
