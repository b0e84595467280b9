pub const API_ACCESS_HELP: &'static str = "
                                API access \n
The chemical-properties API behind this tool can also be called directly. \n
Issue a GET request to the service endpoint with two query parameters: \n
    search      - the InChI key of the chemical to look up \n
    return_all  - true to include every individual measurement, \n
                  false for property aggregates only \n
and pass your credential in the Authorization header as a bearer token. \n
The response is a JSON document with the chemical record (name, IUPAC name, \n
synonyms) and its physical properties. \n

Public access is available through RapidAPI: \n
    https://rapidapi.com/hazmatteam-hazmatteam-default/api/chemical-properties \n
";

pub fn api_access_menu() {
    println!("{}", API_ACCESS_HELP);
}
