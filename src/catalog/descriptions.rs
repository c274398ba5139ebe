//! Bilingual parameter labels shared by all firmware templates.

/// `(parameter name, English, German)`, sorted by name for binary search.
pub(super) static DESCRIPTIONS: &[(&str, &str, &str)] = &[
    ("AA Dir", "Ash Auger Direction", "Aschenschnecke Richtung"),
    ("AA Run", "Ash Auger Run", "Aschenschnecke Läuft"),
    ("AIN17", "Analog Input 17", "Analogeingang 17"),
    ("AS RA Dir", "Ash Grate Direction", "Asche Rost Richtung"),
    ("AS RA Run", "Ash Grate Run", "Asche Rost Läuft"),
    ("AS Saug", "Ash Suction", "Asche Saugen"),
    ("ATW", "Heat Pump", "Außentemperatur-Wärmepumpe"),
    ("Akt. Code", "Active Code", "Aktiver Code"),
    ("Anf. HKR0", "Demand HC 0", "Anforderung HK 0"),
    ("Anf. HKR1", "Demand HC 1", "Anforderung HK 1"),
    ("Anf. HKR10", "Demand HC 10", "Anforderung HK 10"),
    ("Anf. HKR11", "Demand HC 11", "Anforderung HK 11"),
    ("Anf. HKR12", "Demand HC 12", "Anforderung HK 12"),
    ("Anf. HKR13", "Demand HC 13", "Anforderung HK 13"),
    ("Anf. HKR14", "Demand HC 14", "Anforderung HK 14"),
    ("Anf. HKR15", "Demand HC 15", "Anforderung HK 15"),
    ("Anf. HKR2", "Demand HC 2", "Anforderung HK 2"),
    ("Anf. HKR3", "Demand HC 3", "Anforderung HK 3"),
    ("Anf. HKR4", "Demand HC 4", "Anforderung HK 4"),
    ("Anf. HKR5", "Demand HC 5", "Anforderung HK 5"),
    ("Anf. HKR6", "Demand HC 6", "Anforderung HK 6"),
    ("Anf. HKR7", "Demand HC 7", "Anforderung HK 7"),
    ("Anf. HKR8", "Demand HC 8", "Anforderung HK 8"),
    ("Anf. HKR9", "Demand HC 9", "Anforderung HK 9"),
    ("Anzahl Entasch.", "Ash Removal Count", "Anzahl Entaschungen"),
    ("Anzahl SR Beweg.", "Stoker Movement Count", "Anzahl Schürerbewegungen"),
    ("Aschebox", "Ash Box", "Aschebox"),
    ("BLDC_ES ist", "BLDC Auger Actual", "BLDC Einschubschnecke Ist"),
    ("BLDC_ES soll", "BLDC Auger Setpoint", "BLDC Einschubschnecke Soll"),
    ("BP1", "Boiler Pump 1", "Boilerpumpe 1"),
    ("BP2", "Boiler Pump 2", "Boilerpumpe 2"),
    ("BP3", "Boiler Pump 3", "Boilerpumpe 3"),
    ("BPA", "Boiler Pump A", "Boilerpumpe A"),
    ("BPB", "Boiler Pump B", "Boilerpumpe B"),
    ("BRT", "Burner Temperature", "Brennraumtemperatur"),
    ("BZP1", "Circulation Pump 1", "Zirkulationspumpe 1"),
    ("BZP2", "Circulation Pump 2", "Zirkulationspumpe 2"),
    ("BZP3", "Circulation Pump 3", "Zirkulationspumpe 3"),
    ("BZPA", "Circulation Pump A", "Zirkulationspumpe A"),
    ("BZPB", "Circulation Pump B", "Zirkulationspumpe B"),
    ("DReg Mi auf", "Pressure Ctrl Mixer Open", "Druckregler Mischer Auf"),
    ("DReg Mi zu", "Pressure Ctrl Mixer Close", "Druckregler Mischer Zu"),
    ("DReg P2", "Pressure Ctrl Pump 2", "Druckregler Pumpe 2"),
    ("DReg P3", "Pressure Ctrl Pump 3", "Druckregler Pumpe 3"),
    ("DReg2 Mi auf", "Pressure Ctrl 2 Mixer Open", "Druckregler 2 Mischer Auf"),
    ("DReg2 Mi zu", "Pressure Ctrl 2 Mixer Close", "Druckregler 2 Mischer Zu"),
    ("DReg2 P2", "Pressure Ctrl 2 Pump 2", "Druckregler 2 Pumpe 2"),
    ("DReg3 Mi auf", "Pressure Ctrl 3 Mixer Open", "Druckregler 3 Mischer Auf"),
    ("DReg3 Mi zu", "Pressure Ctrl 3 Mixer Close", "Druckregler 3 Mischer Zu"),
    ("DReg3 P2", "Pressure Ctrl 3 Pump 2", "Druckregler 3 Pumpe 2"),
    ("DReg3 P3", "Pressure Ctrl 3 Pump 3", "Druckregler 3 Pumpe 3"),
    ("ES Dir", "Auger Direction", "Einschubschnecke Richtung"),
    ("ES Run", "Auger Run", "Einschubschnecke Läuft"),
    ("ESRegler", "Auger Controller", "Einschubschnecken-Regler"),
    ("ESsoll", "Auger Setpoint", "Einschubschnecke Soll"),
    ("Effizienz", "Efficiency", "Wirkungsgrad"),
    ("Entasch gesp.", "Ash Removal Locked", "Entaschung Gesperrt"),
    ("Es Rein Endl", "Auger Cleaning Endpoint", "Einschubschnecke Reinigung Endlage"),
    ("ExtHK Anf", "Ext HC Request", "Ext Heizkreis Anforderung"),
    ("ExtHK Pumpe", "Ext HC Pump", "Ext Heizkreis Pumpe"),
    ("ExtHK Solltmp.", "Ext. HC Setpoint", "Ext. Heizkreis Solltemperatur"),
    ("ExtHK vorh", "Ext HC Present", "Ext Heizkreis Vorhanden"),
    ("ExtHK_2 Anf", "Ext HC 2 Request", "Ext Heizkreis 2 Anforderung"),
    ("ExtHK_2 Pumpe", "Ext HC 2 Pump", "Ext Heizkreis 2 Pumpe"),
    ("ExtHK_2 vorh", "Ext HC 2 Present", "Ext Heizkreis 2 Vorhanden"),
    ("ExtHK_3 Anf", "Ext HC 3 Request", "Ext Heizkreis 3 Anforderung"),
    ("ExtHK_3 Pumpe", "Ext HC 3 Pump", "Ext Heizkreis 3 Pumpe"),
    ("ExtHK_3 vorh", "Ext HC 3 Present", "Ext Heizkreis 3 Vorhanden"),
    ("FLP", "Floorheating Pump", "Fußbodenheizungspumpe"),
    ("FR1 Zustand", "Room Thermostat 1 State", "Raumthermostat 1 Zustand"),
    ("FR2 Zustand", "Room Thermostat 2 State", "Raumthermostat 2 Zustand"),
    ("FRA Zustand", "Room Thermostat A State", "Raumthermostat A Zustand"),
    ("FRB Zustand", "Room Thermostat B State", "Raumthermostat B Zustand"),
    ("FW Freig.", "Fresh Water Release", "Frischwasser Freigabe"),
    ("Fuellstand", "Fill Level", "Füllstand"),
    ("HK-P MA", "HC Mixer Open", "Heizkreis Mischer Auf"),
    ("HK-P MZ", "HC Mixer Close", "Heizkreis Mischer Zu"),
    ("HK-P Poolp", "HC Pool Pump", "Heizkreis Poolpumpe"),
    ("HK-P Primp", "HC Primary Pump", "Heizkreis Primärpumpe"),
    ("HKP1", "HC Pump 1", "Heizkreispumpe 1"),
    ("HKP1 Status", "Pump 1 Status", "Heizkreispumpe 1 Status"),
    ("HKP2", "HC Pump 2", "Heizkreispumpe 2"),
    ("HKP2 Status", "Pump 2 Status", "Heizkreispumpe 2 Status"),
    ("HKP3", "HC Pump 3", "Heizkreispumpe 3"),
    ("HKP4", "HC Pump 4", "Heizkreispumpe 4"),
    ("HKP5", "HC Pump 5", "Heizkreispumpe 5"),
    ("HKP6", "HC Pump 6", "Heizkreispumpe 6"),
    ("HKPA", "HC Pump A", "Heizkreispumpe A"),
    ("HKPA Status", "Pump A Status", "Heizkreispumpe A Status"),
    ("HKPB", "HC Pump B", "Heizkreispumpe B"),
    ("HKPB Status", "Pump B Status", "Heizkreispumpe B Status"),
    ("HKR Anf", "HC Demand", "Heizkreis-Anforderung"),
    ("HKV", "HC Distribution", "Heizkreisverteiler"),
    ("HKZustand_1", "State HC 1", "Zustand HK 1"),
    ("HKZustand_2", "State HC 2", "Zustand HK 2"),
    ("HKZustand_A", "State HC A", "Zustand HK A"),
    ("HKZustand_B", "State HC B", "Zustand HK B"),
    ("Heiz I Lambda", "Lambda Heating Current", "Lambda Heizstrom"),
    ("Heiz P Lambda", "Lambda Heating Power", "Lambda Heizleistung"),
    ("Heiz U Lambda", "Lambda Heating Voltage", "Lambda Heizspannung"),
    ("I Aa", "Current Ash Auger", "Strom Aschenschnecke"),
    ("I Es", "Current Auger", "Strom Einschubschnecke"),
    ("I Ra", "Current Grate", "Strom Rost"),
    ("I Rein", "Current Cleaning", "Strom Reinigung"),
    ("I Sr", "Current Stoker", "Strom Schürer"),
    ("KASK FW OK", "Cascade FW OK", "Kaskade FW OK"),
    ("KASK KWK OK", "Cascade CHP OK", "Kaskade KWK OK"),
    ("KASK1 MaxLeist", "Cascade 1 Max Power", "Kaskade 1 Maximalleistung"),
    ("KASK1 MinLeist", "Cascade 1 Min Power", "Kaskade 1 Minimalleistung"),
    ("KASK1 OK", "Cascade 1 OK", "Kaskade 1 OK"),
    ("KASK1 Run", "Cascade 1 Running", "Kaskade 1 Läuft"),
    ("KASK2 MaxLeist", "Cascade 2 Max Power", "Kaskade 2 Maximalleistung"),
    ("KASK2 MinLeist", "Cascade 2 Min Power", "Kaskade 2 Minimalleistung"),
    ("KASK2 OK", "Cascade 2 OK", "Kaskade 2 OK"),
    ("KASK2 Run", "Cascade 2 Running", "Kaskade 2 Läuft"),
    ("KASK3 MaxLeist", "Cascade 3 Max Power", "Kaskade 3 Maximalleistung"),
    ("KASK3 MinLeist", "Cascade 3 Min Power", "Kaskade 3 Minimalleistung"),
    ("KASK3 OK", "Cascade 3 OK", "Kaskade 3 OK"),
    ("KASK3 Run", "Cascade 3 Running", "Kaskade 3 Läuft"),
    ("KASK4 MaxLeist", "Cascade 4 Max Power", "Kaskade 4 Maximalleistung"),
    ("KASK4 MinLeist", "Cascade 4 Min Power", "Kaskade 4 Minimalleistung"),
    ("KASK4 OK", "Cascade 4 OK", "Kaskade 4 OK"),
    ("KASK4 Run", "Cascade 4 Running", "Kaskade 4 Läuft"),
    ("Kask FW Out", "Cascade FW Output", "Kaskade FW Ausgang"),
    ("Kask KWK Out", "Cascade CHP Output", "Kaskade KWK Ausgang"),
    ("KeBrstScale", "Boiler Burner Scale", "Kessel-Brenner-Skalierung"),
    ("L Heiz.", "Load Heating", "Ladung Heizung"),
    ("LZ ES seit Ent.", "Runtime Since Ash", "Laufzeit seit Entaschung"),
    ("LZ ES seit Füll.", "Runtime Since Fill", "Laufzeit seit Füllung"),
    ("Lagerraum", "Storage Room", "Lagerraum"),
    ("Lagerstand", "Pellet Stock", "Pelletvorrat"),
    ("Leistung", "Output Power", "Ausgangsleistung"),
    ("M1A", "Mixer 1 Open", "Mischer 1 Auf"),
    ("M1Z", "Mixer 1 Close", "Mischer 1 Zu"),
    ("M2A", "Mixer 2 Open", "Mischer 2 Auf"),
    ("M2Z", "Mixer 2 Close", "Mischer 2 Zu"),
    ("M3A", "Mixer 3 Open", "Mischer 3 Auf"),
    ("M3Z", "Mixer 3 Close", "Mischer 3 Zu"),
    ("M4A", "Mixer 4 Open", "Mischer 4 Auf"),
    ("M4Z", "Mixer 4 Close", "Mischer 4 Zu"),
    ("M5A", "Mixer 5 Open", "Mischer 5 Auf"),
    ("M5Z", "Mixer 5 Close", "Mischer 5 Zu"),
    ("M6A", "Mixer 6 Open", "Mischer 6 Auf"),
    ("M6Z", "Mixer 6 Close", "Mischer 6 Zu"),
    ("MAA", "Mixer A Open", "Mischer A Auf"),
    ("MAZ", "Mixer A Close", "Mischer A Zu"),
    ("MBA", "Mixer B Open", "Mischer B Auf"),
    ("MBZ", "Mixer B Close", "Mischer B Zu"),
    ("Max Anf Kessel", "Max Boiler Demand", "Max Kesselanforderung"),
    ("Max Anf ZenPuf", "Max Central Buffer Demand", "Max Zentralpuffer-Anforderung"),
    ("Netzrelais", "Power Relay", "Netzrelais"),
    ("Netztrafo", "Power Transformer", "Netztrafo"),
    ("O2", "O2 Level", "O2-Gehalt"),
    ("O2soll", "O2 Setpoint", "O2-Sollwert"),
    ("Programm", "Program", "Programm"),
    ("Puff Füllgrad", "Buffer Fill Level", "Pufferfüllgrad"),
    ("PuffZustand", "Buffer State", "Pufferzustand"),
    ("Puffer_soll oben", "Buffer Setpoint Top", "Puffer Sollwert Oben"),
    ("Puffer_soll unten", "Buffer Setpoint Bottom", "Puffer Sollwert Unten"),
    ("RLP/PuffP", "Return Pump/Buffer Pump", "Rücklaufpumpe/Pufferpumpe"),
    ("RLm_auf", "Return Mixer Open", "Rücklaufmischer Auf"),
    ("RLm_zu", "Return Mixer Close", "Rücklaufmischer Zu"),
    ("Regler K", "Controller K", "Regler K"),
    ("Rein En", "Cleaning Enable", "Reinigung Aktiviert"),
    ("Rein Run", "Cleaning Run", "Reinigung Läuft"),
    ("Reserved_5", "Reserved Digital 5", "Reserviert Digital 5"),
    ("Reserved_8", "Reserved Digital 8", "Reserviert Digital 8"),
    ("SZist", "Draft Actual", "Saugzug Ist"),
    ("SZsoll", "Draft Setpoint", "Saugzug Soll"),
    ("Spreizung", "Temperature Spread", "Temperaturspreizung"),
    ("Spülung Aktiv", "Flushing Active", "Spülung Aktiv"),
    ("Stb", "Standby", "Standby"),
    ("Störung", "Error", "Störung"),
    ("Störungs Nr", "Error Code", "Störungsnummer"),
    ("T Spülung", "Flushing Temperature", "Spültemperatur"),
    ("TA Gem.", "Average Outside Temperature", "Außentemperatur Gemittelt"),
    ("TB1", "Hot Water 1", "Warmwasser 1"),
    ("TBA", "Hot Water A", "Warmwasser A"),
    ("TBB", "Hot Water B", "Warmwasser B"),
    ("TBs_1", "Hot Water Setpoint 1", "Warmwasser Soll 1"),
    ("TBs_A", "Hot Water Setpoint A", "Warmwasser Soll A"),
    ("TBs_B", "Hot Water Setpoint B", "Warmwasser Soll B"),
    ("TFW", "Fresh Water Temperature", "Frischwassertemperatur"),
    ("TK", "Boiler Temperature", "Kesseltemperatur"),
    ("TKsoll", "Boiler Setpoint", "Kessel-Solltemperatur"),
    ("TPm", "Buffer Middle", "Puffer Mitte"),
    ("TPo", "Buffer Top", "Puffer Oben"),
    ("TPu", "Buffer Bottom", "Puffer Unten"),
    ("TRA_1", "Return HC 1", "Rücklauf HK 1"),
    ("TRA_2", "Return HC 2", "Rücklauf HK 2"),
    ("TRA_A", "Return HC A", "Rücklauf HK A"),
    ("TRA_B", "Return HC B", "Rücklauf HK B"),
    ("TRG", "Flue Gas Temperature", "Rauchgastemperatur"),
    ("TRL", "Return Temperature", "Rücklauftemperatur"),
    ("TRLsoll", "Return Setpoint", "Rücklauf-Solltemperatur"),
    ("TRs_1", "Return Setpoint HC 1", "Rücklauf Soll HK 1"),
    ("TRs_2", "Return Setpoint HC 2", "Rücklauf Soll HK 2"),
    ("TRs_A", "Return Setpoint HC A", "Rücklauf Soll HK A"),
    ("TRs_B", "Return Setpoint HC B", "Rücklauf Soll HK B"),
    ("TVG", "Pre-Flow Temperature", "Vorlauftemperatur Gesamt"),
    ("TVG2", "Pre-Flow Temperature 2", "Vorlauftemperatur 2"),
    ("TVL_1", "Flow HC 1", "Vorlauf HK 1"),
    ("TVL_2", "Flow HC 2", "Vorlauf HK 2"),
    ("TVL_A", "Flow HC A", "Vorlauf HK A"),
    ("TVL_B", "Flow HC B", "Vorlauf HK B"),
    ("TVLs_1", "Flow Setpoint HC 1", "Vorlauf Soll HK 1"),
    ("TVLs_2", "Flow Setpoint HC 2", "Vorlauf Soll HK 2"),
    ("TVLs_A", "Flow Setpoint HC A", "Vorlauf Soll HK A"),
    ("TVLs_B", "Flow Setpoint HC B", "Vorlauf Soll HK B"),
    ("Taus", "Outside Temperature", "Außentemperatur"),
    ("Tplat", "Board Temperature", "Platinentemperatur"),
    ("U Netzteil", "Power Supply Voltage", "Netzteil-Spannung"),
    ("U_Lambda", "Lambda Voltage", "Lambda Spannung"),
    ("Verbrauchszähler", "Pellet Consumption", "Pelletverbrauch"),
    ("WS freig.", "Water Protection Release", "Wasserschutz Freigabe"),
    ("Wasserdruck", "Water Pressure", "Wasserdruck"),
    ("Z Geb.", "Ignition Blower", "Zündgebläse"),
    ("Z Heiz.", "Ignition Heating", "Zündung Heizung"),
    ("ZK", "Boiler State", "Kesselzustand"),
    ("gFl2M auf", "Floorheating 2 Mixer Open", "Fußbodenheizung 2 Mischer Auf"),
    ("gFl2M zu", "Floorheating 2 Mixer Close", "Fußbodenheizung 2 Mischer Zu"),
    ("gFl2P", "Floorheating 2 Pump", "Fußbodenheizung 2 Pumpe"),
    ("gFlM auf", "Floorheating Mixer Open", "Fußbodenheizung Mischer Auf"),
    ("gFlM zu", "Floorheating Mixer Close", "Fußbodenheizung Mischer Zu"),
    ("gFlP", "Floorheating Pump", "Fußbodenheizung Pumpe"),
    ("max.Leist.Fuell", "Max Power Fill", "Max Leistung Füllung"),
    ("max.Leist.TPO", "Max Power Buffer Top", "Max Leistung Puffer Oben"),
    ("max.Leist.TRG", "Max Power Flue Gas", "Max Leistung Rauchgas"),
    ("min.Leist.TRG", "Min Power Flue Gas", "Min Leistung Rauchgas"),
    ("sAS Anf Füll", "Ash Auger Fill Request", "Aschenschnecke Anforderung Füllung"),
];
