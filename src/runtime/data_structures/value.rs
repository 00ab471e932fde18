use std::fmt::{ self,
                Display,
                Formatter };



/// The three categories a value can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType
{
    Integer,
    Real,
    String
}


impl ValueType
{
    /// Name the type for a diagnostic, either as "an integer" or as "integers".
    pub fn human(&self, plural: bool) -> &'static str
    {
        match ( self, plural )
        {
            ( ValueType::Integer, false ) => "an integer",
            ( ValueType::Integer, true  ) => "integers",
            ( ValueType::Real,    false ) => "a real",
            ( ValueType::Real,    true  ) => "reals",
            ( ValueType::String,  false ) => "a string",
            ( ValueType::String,  true  ) => "strings"
        }
    }
}


impl Display for ValueType
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.human(false))
    }
}



/// The data held by a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Data
{
    /// A 64-bit signed integer.
    Integer(i64),

    /// A 64-bit floating point value.
    Real(f64),

    /// A string.
    String(String)
}


impl Data
{
    pub fn value_type(&self) -> ValueType
    {
        match self
        {
            Data::Integer(_) => ValueType::Integer,
            Data::Real(_)    => ValueType::Real,
            Data::String(_)  => ValueType::String
        }
    }
}


/// Render the data the way `print` writes it.
impl Display for Data
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Data::Integer(value) => write!(f, "{}", value),
            Data::Real(value)    => write!(f, "{}", format_real(*value)),
            Data::String(value)  => write!(f, "{}", value)
        }
    }
}


/// Define the conversions from raw data types.
macro_rules! data_conversion
{
    ($data_type:ty , $variant:ident) =>
    {
        #[doc = concat!("Support converting from a ", stringify!($data_type), " to Data.")]
        impl From<$data_type> for Data
        {
            fn from(original: $data_type) -> Data
            {
                Data::$variant(original)
            }
        }
    };
}


data_conversion!(i64,    Integer);
data_conversion!(f64,    Real);
data_conversion!(String, String);


impl From<bool> for Data
{
    fn from(original: bool) -> Data
    {
        Data::Integer(original as i64)
    }
}


impl From<&str> for Data
{
    fn from(original: &str) -> Data
    {
        Data::String(original.to_string())
    }
}



/// A value on the deq.  Along with its data a value remembers the index of the token that
/// introduced it, either the literal itself or the operation that computed it.  The index is only
/// resolved against the token list when an error needs to point at the value's origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Value
{
    data: Data,
    origin: usize
}


/// Handily implement variant checks for the types the Data enumeration supports.
macro_rules! is_variant
{
    ($name:ident , $either_name:ident , $variant:ident) =>
    {
        #[doc = concat!("Check if the value is the variant ", stringify!($variant), ".")]
        pub fn $name(&self) -> bool
        {
            matches!(self.data, Data::$variant(_))
        }

        #[doc = concat!("Check if either of the two values are the variant ",
                        stringify!($variant),
                        ".")]
        pub fn $either_name(a: &Value, b: &Value) -> bool
        {
            a.$name() || b.$name()
        }
    };
}


impl Value
{
    pub fn new(origin: usize, data: Data) -> Value
    {
        Value { data, origin }
    }

    /// The data held by this value.
    pub fn data(&self) -> &Data
    {
        &self.data
    }

    /// Index of the token that introduced this value.
    pub fn origin(&self) -> usize
    {
        self.origin
    }

    pub fn value_type(&self) -> ValueType
    {
        self.data.value_type()
    }

    is_variant!(is_integer, either_is_integer, Integer);
    is_variant!(is_real,    either_is_real,    Real);
    is_variant!(is_string,  either_is_string,  String);
}


impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.data)
    }
}



/// Format a real the way C's `%g` does with the default precision of six significant digits.
/// Scientific notation is used for exponents below -4 or at six and above, and trailing zeros are
/// dropped.
pub fn format_real(value: f64) -> String
{
    const PRECISION: i32 = 6;

    if value.is_nan()
    {
        return "nan".to_string();
    }

    if value.is_infinite()
    {
        return if value < 0.0 { "-inf".to_string() } else { "inf".to_string() };
    }

    if value == 0.0
    {
        return if value.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }

    // Round to the significant digits first, the exponent of the rounded value decides the style.
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let ( mantissa, exponent ) = match scientific.split_once('e')
        {
            Some(( mantissa, exponent )) => ( mantissa, exponent.parse::<i32>().unwrap_or(0) ),
            None => ( scientific.as_str(), 0 )
        };

    if exponent < -4 || exponent >= PRECISION
    {
        let sign = if exponent < 0 { '-' } else { '+' };

        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    }
    else
    {
        let decimals = (PRECISION - 1 - exponent) as usize;

        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}


/// Drop trailing zeros after the decimal point, and the point itself if nothing is left after it.
fn trim_fraction(text: &str) -> &str
{
    if text.contains('.')
    {
        text.trim_end_matches('0').trim_end_matches('.')
    }
    else
    {
        text
    }
}
