// crates/addressing-core/src/country.rs

use crate::error::{AddressingError, Result};
use crate::loader::DefinitionProvider;
use crate::locale;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

/// Display locales with country-name data in the full CLDR export.
pub const AVAILABLE_LOCALES: &[&str] = &[
    "af", "am", "ar", "ar-LY", "ar-SA", "as", "az", "be", "bg", "bn", "bn-IN", "bs", "ca", "chr",
    "cs", "cy", "da", "de", "de-AT", "de-CH", "dsb", "el", "el-polyton", "en", "en-001", "en-AU",
    "en-CA", "en-ID", "en-MV", "es", "es-419", "es-AR", "es-BO", "es-CL", "es-CO", "es-CR",
    "es-DO", "es-EC", "es-GT", "es-HN", "es-MX", "es-NI", "es-PA", "es-PE", "es-PR", "es-PY",
    "es-SV", "es-US", "es-VE", "et", "eu", "fa", "fa-AF", "fi", "fil", "fr", "fr-BE", "fr-CA",
    "ga", "gd", "gl", "gu", "he", "hi", "hi-Latn", "hr", "hsb", "hu", "hy", "id", "ig", "is",
    "it", "ja", "ka", "kk", "km", "ko", "ko-KP", "kok", "ky", "lo", "lt", "lv", "mk", "ml", "mn",
    "mr", "ms", "my", "ne", "nl", "nn", "no", "or", "pa", "pl", "ps", "ps-PK", "pt", "pt-PT",
    "ro", "ro-MD", "ru", "ru-UA", "si", "sk", "sl", "so", "sq", "sr", "sr-Cyrl-BA", "sr-Cyrl-ME",
    "sr-Cyrl-XK", "sr-Latn", "sr-Latn-BA", "sr-Latn-ME", "sr-Latn-XK", "sv", "sw", "sw-CD",
    "sw-KE", "ta", "te", "th", "tk", "tr", "uk", "ur", "ur-IN", "uz", "vi", "yue", "yue-Hans",
    "zh", "zh-Hant", "zh-Hant-HK", "zu",
];

type Metadata = (
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
);

// code, alpha-3, numeric, currency
const BASE_DEFINITIONS: &[Metadata] = &[
    ("AC", Some("ASC"), None, Some("SHP")),
    ("AD", Some("AND"), Some("020"), Some("EUR")),
    ("AE", Some("ARE"), Some("784"), Some("AED")),
    ("AF", Some("AFG"), Some("004"), Some("AFN")),
    ("AG", Some("ATG"), Some("028"), Some("XCD")),
    ("AI", Some("AIA"), Some("660"), Some("XCD")),
    ("AL", Some("ALB"), Some("008"), Some("ALL")),
    ("AM", Some("ARM"), Some("051"), Some("AMD")),
    ("AO", Some("AGO"), Some("024"), Some("AOA")),
    ("AQ", Some("ATA"), Some("010"), None),
    ("AR", Some("ARG"), Some("032"), Some("ARS")),
    ("AS", Some("ASM"), Some("016"), Some("USD")),
    ("AT", Some("AUT"), Some("040"), Some("EUR")),
    ("AU", Some("AUS"), Some("036"), Some("AUD")),
    ("AW", Some("ABW"), Some("533"), Some("AWG")),
    ("AX", Some("ALA"), Some("248"), Some("EUR")),
    ("AZ", Some("AZE"), Some("031"), Some("AZN")),
    ("BA", Some("BIH"), Some("070"), Some("BAM")),
    ("BB", Some("BRB"), Some("052"), Some("BBD")),
    ("BD", Some("BGD"), Some("050"), Some("BDT")),
    ("BE", Some("BEL"), Some("056"), Some("EUR")),
    ("BF", Some("BFA"), Some("854"), Some("XOF")),
    ("BG", Some("BGR"), Some("100"), Some("BGN")),
    ("BH", Some("BHR"), Some("048"), Some("BHD")),
    ("BI", Some("BDI"), Some("108"), Some("BIF")),
    ("BJ", Some("BEN"), Some("204"), Some("XOF")),
    ("BL", Some("BLM"), Some("652"), Some("EUR")),
    ("BM", Some("BMU"), Some("060"), Some("BMD")),
    ("BN", Some("BRN"), Some("096"), Some("BND")),
    ("BO", Some("BOL"), Some("068"), Some("BOB")),
    ("BQ", Some("BES"), Some("535"), Some("USD")),
    ("BR", Some("BRA"), Some("076"), Some("BRL")),
    ("BS", Some("BHS"), Some("044"), Some("BSD")),
    ("BT", Some("BTN"), Some("064"), Some("BTN")),
    ("BV", Some("BVT"), Some("074"), Some("NOK")),
    ("BW", Some("BWA"), Some("072"), Some("BWP")),
    ("BY", Some("BLR"), Some("112"), Some("BYN")),
    ("BZ", Some("BLZ"), Some("084"), Some("BZD")),
    ("CA", Some("CAN"), Some("124"), Some("CAD")),
    ("CC", Some("CCK"), Some("166"), Some("AUD")),
    ("CD", Some("COD"), Some("180"), Some("CDF")),
    ("CF", Some("CAF"), Some("140"), Some("XAF")),
    ("CG", Some("COG"), Some("178"), Some("XAF")),
    ("CH", Some("CHE"), Some("756"), Some("CHF")),
    ("CI", Some("CIV"), Some("384"), Some("XOF")),
    ("CK", Some("COK"), Some("184"), Some("NZD")),
    ("CL", Some("CHL"), Some("152"), Some("CLP")),
    ("CM", Some("CMR"), Some("120"), Some("XAF")),
    ("CN", Some("CHN"), Some("156"), Some("CNY")),
    ("CO", Some("COL"), Some("170"), Some("COP")),
    ("CP", Some("CPT"), None, None),
    ("CR", Some("CRI"), Some("188"), Some("CRC")),
    ("CU", Some("CUB"), Some("192"), Some("CUP")),
    ("CV", Some("CPV"), Some("132"), Some("CVE")),
    ("CW", Some("CUW"), Some("531"), Some("XCG")),
    ("CX", Some("CXR"), Some("162"), Some("AUD")),
    ("CY", Some("CYP"), Some("196"), Some("EUR")),
    ("CZ", Some("CZE"), Some("203"), Some("CZK")),
    ("DE", Some("DEU"), Some("276"), Some("EUR")),
    ("DG", Some("DGA"), None, Some("USD")),
    ("DJ", Some("DJI"), Some("262"), Some("DJF")),
    ("DK", Some("DNK"), Some("208"), Some("DKK")),
    ("DM", Some("DMA"), Some("212"), Some("XCD")),
    ("DO", Some("DOM"), Some("214"), Some("DOP")),
    ("DZ", Some("DZA"), Some("012"), Some("DZD")),
    ("EA", None, None, Some("EUR")),
    ("EC", Some("ECU"), Some("218"), Some("USD")),
    ("EE", Some("EST"), Some("233"), Some("EUR")),
    ("EG", Some("EGY"), Some("818"), Some("EGP")),
    ("EH", Some("ESH"), Some("732"), Some("MAD")),
    ("ER", Some("ERI"), Some("232"), Some("ERN")),
    ("ES", Some("ESP"), Some("724"), Some("EUR")),
    ("ET", Some("ETH"), Some("231"), Some("ETB")),
    ("FI", Some("FIN"), Some("246"), Some("EUR")),
    ("FJ", Some("FJI"), Some("242"), Some("FJD")),
    ("FK", Some("FLK"), Some("238"), Some("FKP")),
    ("FM", Some("FSM"), Some("583"), Some("USD")),
    ("FO", Some("FRO"), Some("234"), Some("DKK")),
    ("FR", Some("FRA"), Some("250"), Some("EUR")),
    ("GA", Some("GAB"), Some("266"), Some("XAF")),
    ("GB", Some("GBR"), Some("826"), Some("GBP")),
    ("GD", Some("GRD"), Some("308"), Some("XCD")),
    ("GE", Some("GEO"), Some("268"), Some("GEL")),
    ("GF", Some("GUF"), Some("254"), Some("EUR")),
    ("GG", Some("GGY"), Some("831"), Some("GBP")),
    ("GH", Some("GHA"), Some("288"), Some("GHS")),
    ("GI", Some("GIB"), Some("292"), Some("GIP")),
    ("GL", Some("GRL"), Some("304"), Some("DKK")),
    ("GM", Some("GMB"), Some("270"), Some("GMD")),
    ("GN", Some("GIN"), Some("324"), Some("GNF")),
    ("GP", Some("GLP"), Some("312"), Some("EUR")),
    ("GQ", Some("GNQ"), Some("226"), Some("XAF")),
    ("GR", Some("GRC"), Some("300"), Some("EUR")),
    ("GS", Some("SGS"), Some("239"), Some("GBP")),
    ("GT", Some("GTM"), Some("320"), Some("GTQ")),
    ("GU", Some("GUM"), Some("316"), Some("USD")),
    ("GW", Some("GNB"), Some("624"), Some("XOF")),
    ("GY", Some("GUY"), Some("328"), Some("GYD")),
    ("HK", Some("HKG"), Some("344"), Some("HKD")),
    ("HM", Some("HMD"), Some("334"), Some("AUD")),
    ("HN", Some("HND"), Some("340"), Some("HNL")),
    ("HR", Some("HRV"), Some("191"), Some("EUR")),
    ("HT", Some("HTI"), Some("332"), Some("USD")),
    ("HU", Some("HUN"), Some("348"), Some("HUF")),
    ("IC", None, None, Some("EUR")),
    ("ID", Some("IDN"), Some("360"), Some("IDR")),
    ("IE", Some("IRL"), Some("372"), Some("EUR")),
    ("IL", Some("ISR"), Some("376"), Some("ILS")),
    ("IM", Some("IMN"), Some("833"), Some("GBP")),
    ("IN", Some("IND"), Some("356"), Some("INR")),
    ("IO", Some("IOT"), Some("086"), Some("USD")),
    ("IQ", Some("IRQ"), Some("368"), Some("IQD")),
    ("IR", Some("IRN"), Some("364"), Some("IRR")),
    ("IS", Some("ISL"), Some("352"), Some("ISK")),
    ("IT", Some("ITA"), Some("380"), Some("EUR")),
    ("JE", Some("JEY"), Some("832"), Some("GBP")),
    ("JM", Some("JAM"), Some("388"), Some("JMD")),
    ("JO", Some("JOR"), Some("400"), Some("JOD")),
    ("JP", Some("JPN"), Some("392"), Some("JPY")),
    ("KE", Some("KEN"), Some("404"), Some("KES")),
    ("KG", Some("KGZ"), Some("417"), Some("KGS")),
    ("KH", Some("KHM"), Some("116"), Some("KHR")),
    ("KI", Some("KIR"), Some("296"), Some("AUD")),
    ("KM", Some("COM"), Some("174"), Some("KMF")),
    ("KN", Some("KNA"), Some("659"), Some("XCD")),
    ("KP", Some("PRK"), Some("408"), Some("KPW")),
    ("KR", Some("KOR"), Some("410"), Some("KRW")),
    ("KW", Some("KWT"), Some("414"), Some("KWD")),
    ("KY", Some("CYM"), Some("136"), Some("KYD")),
    ("KZ", Some("KAZ"), Some("398"), Some("KZT")),
    ("LA", Some("LAO"), Some("418"), Some("LAK")),
    ("LB", Some("LBN"), Some("422"), Some("LBP")),
    ("LC", Some("LCA"), Some("662"), Some("XCD")),
    ("LI", Some("LIE"), Some("438"), Some("CHF")),
    ("LK", Some("LKA"), Some("144"), Some("LKR")),
    ("LR", Some("LBR"), Some("430"), Some("LRD")),
    ("LS", Some("LSO"), Some("426"), Some("LSL")),
    ("LT", Some("LTU"), Some("440"), Some("EUR")),
    ("LU", Some("LUX"), Some("442"), Some("EUR")),
    ("LV", Some("LVA"), Some("428"), Some("EUR")),
    ("LY", Some("LBY"), Some("434"), Some("LYD")),
    ("MA", Some("MAR"), Some("504"), Some("MAD")),
    ("MC", Some("MCO"), Some("492"), Some("EUR")),
    ("MD", Some("MDA"), Some("498"), Some("MDL")),
    ("ME", Some("MNE"), Some("499"), Some("EUR")),
    ("MF", Some("MAF"), Some("663"), Some("EUR")),
    ("MG", Some("MDG"), Some("450"), Some("MGA")),
    ("MH", Some("MHL"), Some("584"), Some("USD")),
    ("MK", Some("MKD"), Some("807"), Some("MKD")),
    ("ML", Some("MLI"), Some("466"), Some("XOF")),
    ("MM", Some("MMR"), Some("104"), Some("MMK")),
    ("MN", Some("MNG"), Some("496"), Some("MNT")),
    ("MO", Some("MAC"), Some("446"), Some("MOP")),
    ("MP", Some("MNP"), Some("580"), Some("USD")),
    ("MQ", Some("MTQ"), Some("474"), Some("EUR")),
    ("MR", Some("MRT"), Some("478"), Some("MRU")),
    ("MS", Some("MSR"), Some("500"), Some("XCD")),
    ("MT", Some("MLT"), Some("470"), Some("EUR")),
    ("MU", Some("MUS"), Some("480"), Some("MUR")),
    ("MV", Some("MDV"), Some("462"), Some("MVR")),
    ("MW", Some("MWI"), Some("454"), Some("MWK")),
    ("MX", Some("MEX"), Some("484"), Some("MXN")),
    ("MY", Some("MYS"), Some("458"), Some("MYR")),
    ("MZ", Some("MOZ"), Some("508"), Some("MZN")),
    ("NA", Some("NAM"), Some("516"), Some("NAD")),
    ("NC", Some("NCL"), Some("540"), Some("XPF")),
    ("NE", Some("NER"), Some("562"), Some("XOF")),
    ("NF", Some("NFK"), Some("574"), Some("AUD")),
    ("NG", Some("NGA"), Some("566"), Some("NGN")),
    ("NI", Some("NIC"), Some("558"), Some("NIO")),
    ("NL", Some("NLD"), Some("528"), Some("EUR")),
    ("NO", Some("NOR"), Some("578"), Some("NOK")),
    ("NP", Some("NPL"), Some("524"), Some("NPR")),
    ("NR", Some("NRU"), Some("520"), Some("AUD")),
    ("NU", Some("NIU"), Some("570"), Some("NZD")),
    ("NZ", Some("NZL"), Some("554"), Some("NZD")),
    ("OM", Some("OMN"), Some("512"), Some("OMR")),
    ("PA", Some("PAN"), Some("591"), Some("USD")),
    ("PE", Some("PER"), Some("604"), Some("PEN")),
    ("PF", Some("PYF"), Some("258"), Some("XPF")),
    ("PG", Some("PNG"), Some("598"), Some("PGK")),
    ("PH", Some("PHL"), Some("608"), Some("PHP")),
    ("PK", Some("PAK"), Some("586"), Some("PKR")),
    ("PL", Some("POL"), Some("616"), Some("PLN")),
    ("PM", Some("SPM"), Some("666"), Some("EUR")),
    ("PN", Some("PCN"), Some("612"), Some("NZD")),
    ("PR", Some("PRI"), Some("630"), Some("USD")),
    ("PS", Some("PSE"), Some("275"), Some("JOD")),
    ("PT", Some("PRT"), Some("620"), Some("EUR")),
    ("PW", Some("PLW"), Some("585"), Some("USD")),
    ("PY", Some("PRY"), Some("600"), Some("PYG")),
    ("QA", Some("QAT"), Some("634"), Some("QAR")),
    ("RE", Some("REU"), Some("638"), Some("EUR")),
    ("RO", Some("ROU"), Some("642"), Some("RON")),
    ("RS", Some("SRB"), Some("688"), Some("RSD")),
    ("RU", Some("RUS"), Some("643"), Some("RUB")),
    ("RW", Some("RWA"), Some("646"), Some("RWF")),
    ("SA", Some("SAU"), Some("682"), Some("SAR")),
    ("SB", Some("SLB"), Some("090"), Some("SBD")),
    ("SC", Some("SYC"), Some("690"), Some("SCR")),
    ("SD", Some("SDN"), Some("729"), Some("SDG")),
    ("SE", Some("SWE"), Some("752"), Some("SEK")),
    ("SG", Some("SGP"), Some("702"), Some("SGD")),
    ("SH", Some("SHN"), Some("654"), Some("SHP")),
    ("SI", Some("SVN"), Some("705"), Some("EUR")),
    ("SJ", Some("SJM"), Some("744"), Some("NOK")),
    ("SK", Some("SVK"), Some("703"), Some("EUR")),
    ("SL", Some("SLE"), Some("694"), Some("SLE")),
    ("SM", Some("SMR"), Some("674"), Some("EUR")),
    ("SN", Some("SEN"), Some("686"), Some("XOF")),
    ("SO", Some("SOM"), Some("706"), Some("SOS")),
    ("SR", Some("SUR"), Some("740"), Some("SRD")),
    ("SS", Some("SSD"), Some("728"), Some("SSP")),
    ("ST", Some("STP"), Some("678"), Some("STN")),
    ("SV", Some("SLV"), Some("222"), Some("USD")),
    ("SX", Some("SXM"), Some("534"), Some("XCG")),
    ("SY", Some("SYR"), Some("760"), Some("SYP")),
    ("SZ", Some("SWZ"), Some("748"), Some("SZL")),
    ("TA", Some("TAA"), None, Some("GBP")),
    ("TC", Some("TCA"), Some("796"), Some("USD")),
    ("TD", Some("TCD"), Some("148"), Some("XAF")),
    ("TF", Some("ATF"), Some("260"), Some("EUR")),
    ("TG", Some("TGO"), Some("768"), Some("XOF")),
    ("TH", Some("THA"), Some("764"), Some("THB")),
    ("TJ", Some("TJK"), Some("762"), Some("TJS")),
    ("TK", Some("TKL"), Some("772"), Some("NZD")),
    ("TL", Some("TLS"), Some("626"), Some("USD")),
    ("TM", Some("TKM"), Some("795"), Some("TMT")),
    ("TN", Some("TUN"), Some("788"), Some("TND")),
    ("TO", Some("TON"), Some("776"), Some("TOP")),
    ("TR", Some("TUR"), Some("792"), Some("TRY")),
    ("TT", Some("TTO"), Some("780"), Some("TTD")),
    ("TV", Some("TUV"), Some("798"), Some("AUD")),
    ("TW", Some("TWN"), Some("158"), Some("TWD")),
    ("TZ", Some("TZA"), Some("834"), Some("TZS")),
    ("UA", Some("UKR"), Some("804"), Some("UAH")),
    ("UG", Some("UGA"), Some("800"), Some("UGX")),
    ("UM", Some("UMI"), Some("581"), Some("USD")),
    ("US", Some("USA"), Some("840"), Some("USD")),
    ("UY", Some("URY"), Some("858"), Some("UYU")),
    ("UZ", Some("UZB"), Some("860"), Some("UZS")),
    ("VA", Some("VAT"), Some("336"), Some("EUR")),
    ("VC", Some("VCT"), Some("670"), Some("XCD")),
    ("VE", Some("VEN"), Some("862"), Some("VES")),
    ("VG", Some("VGB"), Some("092"), Some("USD")),
    ("VI", Some("VIR"), Some("850"), Some("USD")),
    ("VN", Some("VNM"), Some("704"), Some("VND")),
    ("VU", Some("VUT"), Some("548"), Some("VUV")),
    ("WF", Some("WLF"), Some("876"), Some("XPF")),
    ("WS", Some("WSM"), Some("882"), Some("WST")),
    ("XK", Some("XKK"), Some("983"), Some("EUR")),
    ("YE", Some("YEM"), Some("887"), Some("YER")),
    ("YT", Some("MYT"), Some("175"), Some("EUR")),
    ("ZA", Some("ZAF"), Some("710"), Some("ZAR")),
    ("ZM", Some("ZMB"), Some("894"), Some("ZMW")),
    ("ZW", Some("ZWE"), Some("716"), Some("ZWG")),
];

fn metadata(country_code: &str) -> Option<&'static Metadata> {
    BASE_DEFINITIONS.iter().find(|(code, ..)| *code == country_code)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    country_code: String,
    name: String,
    three_letter_code: Option<String>,
    numeric_code: Option<String>,
    currency_code: Option<String>,
    locale: String,
}

impl Country {
    fn from_metadata(meta: &Metadata, name: String, locale: &str) -> Self {
        let (code, three_letter_code, numeric_code, currency_code) = *meta;
        Self {
            country_code: code.to_string(),
            name,
            three_letter_code: three_letter_code.map(str::to_string),
            numeric_code: numeric_code.map(str::to_string),
            currency_code: currency_code.map(str::to_string),
            locale: locale.to_string(),
        }
    }

    /// Looks a country up in the process-wide dataset, falling back to `en`
    /// names.
    pub fn get(country_code: &str, locale: &str) -> Result<Country> {
        crate::Dataset::global()
            .countries()
            .get(country_code, locale, Some("en"))
    }

    pub fn all(locale: &str) -> Result<BTreeMap<String, Country>> {
        crate::Dataset::global().countries().all(locale, Some("en"))
    }

    pub fn list(locale: &str) -> Result<BTreeMap<String, String>> {
        crate::Dataset::global().countries().list(locale, Some("en"))
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISO 3166-1 alpha-3 code.
    pub fn three_letter_code(&self) -> Option<&str> {
        self.three_letter_code.as_deref()
    }

    /// ISO 3166-1 numeric code, zero-padded.
    pub fn numeric_code(&self) -> Option<&str> {
        self.numeric_code.as_deref()
    }

    /// ISO 4217 currency code.
    pub fn currency_code(&self) -> Option<&str> {
        self.currency_code.as_deref()
    }

    /// Resolved locale the name is in.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

/// Country names per resolved locale, loaded once each.
pub struct CountryRepository {
    provider: Arc<dyn DefinitionProvider>,
    names: Mutex<HashMap<String, Arc<BTreeMap<String, String>>>>,
}

impl std::fmt::Debug for CountryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("CountryRepository")
            .field("locales", &names.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CountryRepository {
    pub fn new(provider: Arc<dyn DefinitionProvider>) -> Self {
        Self {
            provider,
            names: Mutex::new(HashMap::new()),
        }
    }

    /// Picks the best available locale for `locale`, then `fallback_locale`.
    pub fn resolve_locale(&self, locale: &str, fallback_locale: Option<&str>) -> Result<String> {
        locale::resolve(&self.provider.country_name_locales(), locale, fallback_locale)
    }

    fn load_names(&self, locale: &str) -> Result<Arc<BTreeMap<String, String>>> {
        if let Some(names) = self
            .names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
        {
            trace!(locale, "country names cache hit");
            return Ok(Arc::clone(names));
        }

        debug!(locale, "loading country names");
        let names = self
            .provider
            .country_names(locale)?
            .ok_or_else(|| AddressingError::NotFound(format!("country names for {locale}")))?;

        let mut cache = self.names.lock().unwrap_or_else(PoisonError::into_inner);
        let names = cache
            .entry(locale.to_string())
            .or_insert_with(|| Arc::new(names));
        Ok(Arc::clone(names))
    }

    /// Fails with [`AddressingError::UnknownCountry`] for codes outside the
    /// metadata table and [`AddressingError::UnknownLocale`] when no locale
    /// resolves. A missing translation falls back to the code itself.
    pub fn get(
        &self,
        country_code: &str,
        locale: &str,
        fallback_locale: Option<&str>,
    ) -> Result<Country> {
        let country_code = country_code.to_uppercase();
        let meta = metadata(&country_code)
            .ok_or_else(|| AddressingError::UnknownCountry(country_code.clone()))?;

        let locale = self.resolve_locale(locale, fallback_locale)?;
        let names = self.load_names(&locale)?;
        let name = names.get(&country_code).cloned().unwrap_or(country_code);
        Ok(Country::from_metadata(meta, name, &locale))
    }

    /// Every country named in the resolved locale.
    pub fn all(
        &self,
        locale: &str,
        fallback_locale: Option<&str>,
    ) -> Result<BTreeMap<String, Country>> {
        let locale = self.resolve_locale(locale, fallback_locale)?;
        let names = self.load_names(&locale)?;

        Ok(names
            .iter()
            .filter_map(|(code, name)| {
                let meta = metadata(code)?;
                Some((code.clone(), Country::from_metadata(meta, name.clone(), &locale)))
            })
            .collect())
    }

    /// `country_code => name` in the resolved locale.
    pub fn list(
        &self,
        locale: &str,
        fallback_locale: Option<&str>,
    ) -> Result<BTreeMap<String, String>> {
        let locale = self.resolve_locale(locale, fallback_locale)?;
        Ok(self.load_names(&locale)?.as_ref().clone())
    }
}
